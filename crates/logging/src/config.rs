//! crates/logging/src/config.rs
//! Verbosity configuration combining `-v` counts and per-subsystem flags.

use thiserror::Error;

use super::levels::{Subsystem, SubsystemLevels, level_name};

/// Error returned when a `--debug` flag token cannot be applied.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FlagError {
    /// The token was empty.
    #[error("empty flag token")]
    Empty,
    /// The name did not match any subsystem.
    #[error("unknown debug flag: {0}")]
    UnknownSubsystem(String),
    /// The trailing level was not a valid number.
    #[error("invalid level in flag: {0}")]
    InvalidLevel(String),
}

/// Combined verbosity configuration for every subsystem.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Per-subsystem levels.
    pub levels: SubsystemLevels,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level (number of `-v` flags).
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.levels.replay = 1;
                config.levels.transport = 1;
            }
            2 => {
                config.levels.set_all(1);
                config.levels.replay = 2;
            }
            3 => {
                config.levels.set_all(2);
            }
            _ => {
                config.levels.set_all(3);
            }
        }

        config
    }

    /// Returns the level for `subsystem`.
    #[must_use]
    pub const fn level(&self, subsystem: Subsystem) -> u8 {
        self.levels.get(subsystem)
    }

    /// Apply a comma separated list of flag tokens (e.g. `"transport2,segment"`).
    pub fn apply_debug_flags(&mut self, tokens: &str) -> Result<(), FlagError> {
        tokens
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .try_for_each(|token| self.apply_debug_flag(token))
    }

    /// Apply a single flag token (e.g. `"transport2"`, `"segment"`, `"all3"`).
    ///
    /// A token without a trailing level defaults to level 1.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), FlagError> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.levels.set_all(level);
            return Ok(());
        }

        let subsystem =
            Subsystem::from_name(name).ok_or_else(|| FlagError::UnknownSubsystem(name.to_owned()))?;
        self.levels.set(subsystem, level);
        Ok(())
    }

    /// Renders the configuration as an `EnvFilter` directive string.
    ///
    /// The default level is `warn`; every subsystem adds its own target
    /// directive.
    #[must_use]
    pub fn filter_directives(&self) -> String {
        let mut directives = String::from("warn");
        for subsystem in Subsystem::ALL {
            directives.push(',');
            directives.push_str(subsystem.target());
            directives.push('=');
            directives.push_str(level_name(self.level(subsystem)));
        }
        directives
    }
}

fn parse_flag_token(token: &str) -> Result<(&str, u8), FlagError> {
    if token.is_empty() {
        return Err(FlagError::Empty);
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| FlagError::InvalidLevel(token.to_owned()))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_level_zero_is_quiet() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config, VerbosityConfig::default());
    }

    #[test]
    fn verbose_level_one_enables_replay_and_transport() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.level(Subsystem::Replay), 1);
        assert_eq!(config.level(Subsystem::Transport), 1);
        assert_eq!(config.level(Subsystem::Segment), 0);
    }

    #[test]
    fn verbose_level_saturates() {
        let config = VerbosityConfig::from_verbose_level(200);
        assert!(Subsystem::ALL.iter().all(|s| config.level(*s) == 3));
    }

    #[test]
    fn flag_without_level_defaults_to_one() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("segment").unwrap();
        assert_eq!(config.level(Subsystem::Segment), 1);
    }

    #[test]
    fn flag_with_level_is_applied() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flags("transport3, interpret2").unwrap();
        assert_eq!(config.level(Subsystem::Transport), 3);
        assert_eq!(config.level(Subsystem::Interpret), 2);
    }

    #[test]
    fn all_flag_sets_every_subsystem() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("all2").unwrap();
        assert!(Subsystem::ALL.iter().all(|s| config.level(*s) == 2));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let mut config = VerbosityConfig::default();
        assert_eq!(
            config.apply_debug_flag("flist2"),
            Err(FlagError::UnknownSubsystem("flist".to_owned()))
        );
    }

    #[test]
    fn oversized_level_is_rejected() {
        let mut config = VerbosityConfig::default();
        assert!(matches!(
            config.apply_debug_flag("segment999"),
            Err(FlagError::InvalidLevel(_))
        ));
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut config = VerbosityConfig::default();
        assert_eq!(config.apply_debug_flag(""), Err(FlagError::Empty));
    }

    #[test]
    fn directives_list_every_target() {
        let mut config = VerbosityConfig::default();
        config.levels.segment = 2;
        let directives = config.filter_directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("statewire::segment=debug"));
        assert!(directives.contains("statewire::transport=warn"));
    }
}
