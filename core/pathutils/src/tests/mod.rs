//! PathUtils の単体テスト（ポートはメモリ実装を注入）


mod console_log_tests;
mod shared_storage_tests;
