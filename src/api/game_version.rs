use crate::error::AppError;
use std::fmt;
use std::str::FromStr;

/// Game patch such as `14.18.618.2357` (client) or `14.18.1` (Data Dragon).
///
/// Ordering is numeric, field by field; a missing revision sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GameVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: Option<u32>,
}

impl GameVersion {
    /// Data Dragon publishes one build per patch, always numbered `.1`.
    pub fn to_ddragon(&self) -> String {
        format!("{}.{}.1", self.major, self.minor)
    }

    /// Newest parseable version. Data Dragon's list carries a few legacy
    /// entries like `lolpatch_3.7`, those are skipped.
    pub fn latest<S: AsRef<str>>(versions: &[S]) -> Result<GameVersion, AppError> {
        versions
            .iter()
            .filter_map(|raw| match raw.as_ref().parse::<GameVersion>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::debug!(version = raw.as_ref(), error = %e, "skipping version");
                    None
                }
            })
            .max()
            .ok_or_else(|| AppError::InvalidInput("no valid game versions provided".to_string()))
    }
}

impl FromStr for GameVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(AppError::InvalidInput(format!(
                "invalid version format: {}",
                s
            )));
        }

        let mut nums = Vec::with_capacity(parts.len());
        for part in &parts {
            let n: u32 = part.parse().map_err(|_| {
                AppError::InvalidInput(format!("invalid number in version {}: {}", s, part))
            })?;
            nums.push(n);
        }

        Ok(GameVersion {
            major: nums[0],
            minor: nums[1],
            build: nums[2],
            revision: nums.get(3).copied(),
        })
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.build)?;
        if let Some(revision) = self.revision {
            write!(f, ".{}", revision)?;
        }
        Ok(())
    }
}
