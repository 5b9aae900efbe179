pub mod event;

// Redis に保存するオペーク（非署名）なアクセストークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(pub String);
