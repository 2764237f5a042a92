use crate::{
    config::DndConfig,
    domain::{Board, BoardId, Card, CardId, Column, ColumnId},
    error::{DndError, Result},
    storage::{
        apply_card_move, apply_card_order, apply_column_order, insert_new_card,
        insert_new_column, persisted_card_order, BoardPersistence, NewCard, NewColumn,
    },
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

/// File-based storage: one pretty-printed JSON file per board
pub struct FileStorage {
    root_path: PathBuf,
    // Serializes read-modify-write cycles on board files.
    write_lock: Mutex<()>,
}

impl FileStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const BOARDS_DIR: &'static str = "boards";
    const CONFIG_FILE: &'static str = "config.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
            write_lock: Mutex::new(()),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    /// Path of a board's file; ids that would leave the boards directory
    /// are rejected
    fn board_file(&self, id: &BoardId) -> Result<PathBuf> {
        let id = BoardId::from_str(id.as_str())?;
        let name = id.as_str();
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(DndError::InvalidId(name.to_string()));
        }
        Ok(self.boards_dir().join(format!("{}.json", name)))
    }

    fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the storage directories
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await
    }

    pub async fn is_initialized(&self) -> bool {
        self.boards_dir().exists()
    }

    /// Writes a board, replacing any previous version
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(&board.id)?, json).await?;

        debug!(board = %board.id, "board saved");
        Ok(())
    }

    /// Loads the drag-and-drop config, falling back to defaults when absent
    pub async fn load_config(&self) -> Result<DndConfig> {
        let path = self.config_file();
        if !path.exists() {
            return Ok(DndConfig::default());
        }

        let contents = fs::read_to_string(&path).await?;
        DndConfig::from_json_str(&contents)
    }

    pub async fn save_config(&self, config: &DndConfig) -> Result<()> {
        config.validate()?;
        self.ensure_directory_exists(&self.root_path).await?;

        let json = serde_json::to_string_pretty(config)?;
        fs::write(self.config_file(), json).await?;
        Ok(())
    }

    async fn read_board(&self, board_id: &BoardId) -> Result<Board> {
        let file_path = self.board_file(board_id)?;

        if !file_path.exists() {
            return Err(DndError::BoardNotFound(board_id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let mut board: Board = serde_json::from_str(&contents)?;
        board.normalize();

        Ok(board)
    }

    async fn update<T: Send>(
        &self,
        board_id: &BoardId,
        apply: impl FnOnce(&mut Board) -> Result<T> + Send,
    ) -> Result<T> {
        let _guard = self.write_lock.lock().await;
        let mut board = self.read_board(board_id).await?;
        let value = apply(&mut board)?;
        self.save_board(&board).await?;
        Ok(value)
    }

    async fn board_owning_column(&self, column_id: &ColumnId) -> Result<Board> {
        let boards_dir = self.boards_dir();
        if !boards_dir.exists() {
            return Err(DndError::ColumnNotFound(column_id.to_string()));
        }

        let mut entries = fs::read_dir(&boards_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(board) = self.read_board(&BoardId::from(stem)).await else {
                warn!(file = %path.display(), "skipping unreadable board file");
                continue;
            };
            if board.find_column(column_id).is_some() {
                return Ok(board);
            }
        }

        Err(DndError::ColumnNotFound(column_id.to_string()))
    }
}

#[async_trait]
impl BoardPersistence for FileStorage {
    async fn load_board(&self, board_id: &BoardId) -> Result<Board> {
        self.read_board(board_id).await
    }

    async fn move_columns(&self, board_id: &BoardId, ordered_columns: &[Column]) -> Result<()> {
        self.update(board_id, |board| {
            apply_column_order(board, ordered_columns);
            Ok(())
        })
        .await
    }

    async fn move_card_in_same_column(
        &self,
        column_id: &ColumnId,
        card_order_ids: &[CardId],
    ) -> Result<()> {
        let board = self.board_owning_column(column_id).await?;
        let order = persisted_card_order(column_id, card_order_ids);
        self.update(&board.id, |board| {
            apply_card_order(board, column_id, &order);
            Ok(())
        })
        .await
    }

    async fn move_card_to_different_column(
        &self,
        card_id: &CardId,
        prev_column_id: &ColumnId,
        prev_card_order_ids: &[CardId],
        next_column_id: &ColumnId,
        next_card_order_ids: &[CardId],
    ) -> Result<()> {
        let board = self.board_owning_column(next_column_id).await?;
        self.update(&board.id, |board| {
            apply_card_move(
                board,
                card_id,
                prev_column_id,
                prev_card_order_ids,
                next_column_id,
                next_card_order_ids,
            )
        })
        .await
    }

    async fn create_new_column(&self, board_id: &BoardId, input: NewColumn) -> Result<Column> {
        self.update(board_id, |board| Ok(insert_new_column(board, input)))
            .await
    }

    async fn create_new_card(&self, board_id: &BoardId, input: NewCard) -> Result<Card> {
        self.update(board_id, |board| insert_new_card(board, input))
            .await
    }
}
