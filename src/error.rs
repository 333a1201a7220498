use crate::config::ConfigError;

/// 统一的 Result 类型
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 串口打开或配置失败
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("GUI error: {0}")]
    Gui(String),
}

impl From<eframe::Error> for Error {
    fn from(e: eframe::Error) -> Self {
        Error::Gui(e.to_string())
    }
}
