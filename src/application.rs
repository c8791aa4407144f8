// アプリケーション層モジュール
pub mod app;
pub mod create_app;
pub mod delete_app;
pub mod get_by_id_app;
pub mod list_app;
pub mod update_app;

// 再エクスポート
pub use app::{App, AppError, ValidationStatus};
pub use create_app::CreateApp;
pub use delete_app::DeleteApp;
pub use get_by_id_app::GetByIdApp;
pub use list_app::ListApp;
pub use update_app::UpdateApp;
