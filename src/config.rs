use thiserror::Error;

pub const DEFAULT_SIZE: usize = 5;
pub const DEFAULT_WIN_VALUE: u32 = 2048;
pub const MIN_SIZE: usize = 2;
pub const MAX_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {size} outside {min}..={max}")]
    InvalidSize { size: usize, min: usize, max: usize },
    #[error("win value {0} is not a power of two of at least 4")]
    InvalidWinValue(u32),
}

/// Board dimensions and win threshold for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    size: usize,
    win_value: u32,
}

impl EngineConfig {
    pub fn new(size: usize, win_value: u32) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::InvalidSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }

        if win_value < 4 || !win_value.is_power_of_two() {
            return Err(ConfigError::InvalidWinValue(win_value));
        }

        Ok(Self { size, win_value })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_value(&self) -> u32 {
        self.win_value
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_value: DEFAULT_WIN_VALUE,
        }
    }
}
