//! サーバーAPI呼び出し

pub mod server;
