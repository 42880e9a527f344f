use thiserror::Error;

/// Split policy shared by every node of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// A node splits once it holds more than this many local items.
    pub capacity: usize,
    /// Nodes at this level never split, their local items grow without bound instead.
    pub max_depth: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("node capacity must be at least 1")]
    ZeroCapacity,
    #[error("max depth {max_depth} exceeds the limit of {limit}")]
    DepthTooLarge { max_depth: u32, limit: u32 },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub const DEFAULT_CAPACITY: usize = 12;
    pub const DEFAULT_MAX_DEPTH: u32 = 5;
    // past this the f64 quarters degenerate long before the tree is useful
    pub const DEPTH_LIMIT: u32 = 32;

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_depth > Self::DEPTH_LIMIT {
            return Err(ConfigError::DepthTooLarge {
                max_depth: self.max_depth,
                limit: Self::DEPTH_LIMIT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.capacity, 12);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = Config::default().with_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn rejects_deep_trees() {
        let config = Config::default().with_max_depth(33);
        assert_eq!(
            config.validate(),
            Err(ConfigError::DepthTooLarge {
                max_depth: 33,
                limit: 32
            })
        );
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "node capacity must be at least 1"
        );
    }
}
