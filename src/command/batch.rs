// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command batches sent as a single `Backlog` message.
//!
//! Tasmota executes the commands of a `Backlog` message in order. Each token
//! is preceded by `NoDelay` so the device does not insert its default
//! 200 ms pause between them.
//!
//! # Limitations
//!
//! - Maximum 30 commands per batch (Tasmota `Backlog` limit)
//! - `NoDelay` separators do not count toward the limit
//!
//! # Examples
//!
//! ```
//! use tasmor_light::command::CommandBatch;
//! use tasmor_light::types::{Dimmer, PowerIndex};
//!
//! let batch = CommandBatch::builder()
//!     .disable_fade()
//!     .power_on(PowerIndex::one())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(batch.len(), 2);
//! assert_eq!(batch.to_backlog(), "NoDelay;Fade 0;NoDelay;Power1 ON");
//! ```

use crate::command::{
    ChannelCommand, ColorCommand, ColorTempCommand, Command, DimmerCommand, FadeCommand,
    PowerCommand, SchemeCommand, SpeedCommand, WhiteCommand,
};
use crate::error::EncodeError;
use crate::types::{ColorTemp, Dimmer, FadeSpeed, PowerIndex, RgbColor, Scheme};

/// Maximum number of commands allowed in a batch.
pub const MAX_BATCH_COMMANDS: usize = 30;

/// One command of a batch: keyword plus argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandToken {
    keyword: String,
    argument: Option<String>,
}

impl CommandToken {
    /// Command keyword with any index suffix, e.g. `Power3`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Command argument, e.g. `ON`.
    #[must_use]
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    fn render(&self) -> String {
        match &self.argument {
            Some(arg) => format!("{} {arg}", self.keyword),
            None => self.keyword.clone(),
        }
    }
}

/// An ordered, validated batch of commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBatch {
    tokens: Vec<CommandToken>,
}

impl CommandBatch {
    /// Creates a new batch builder.
    #[must_use]
    pub fn builder() -> CommandBatchBuilder {
        CommandBatchBuilder::new()
    }

    /// Returns the commands in execution order.
    #[must_use]
    pub fn tokens(&self) -> &[CommandToken] {
        &self.tokens
    }

    /// Returns the number of commands in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the batch contains no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Renders the batch as a `Backlog` payload.
    ///
    /// Format: `NoDelay;<cmd1>;NoDelay;<cmd2>`
    #[must_use]
    pub fn to_backlog(&self) -> String {
        self.tokens
            .iter()
            .map(|token| format!("NoDelay;{}", token.render()))
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// Builder for command batches.
#[derive(Debug, Clone, Default)]
pub struct CommandBatchBuilder {
    tokens: Vec<CommandToken>,
}

impl CommandBatchBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    // ========== Fade ==========

    #[must_use]
    pub fn enable_fade(self) -> Self {
        self.push(&FadeCommand::Enable)
    }

    #[must_use]
    pub fn disable_fade(self) -> Self {
        self.push(&FadeCommand::Disable)
    }

    #[must_use]
    pub fn speed(self, speed: FadeSpeed) -> Self {
        self.push(&SpeedCommand::Set(speed))
    }

    // ========== Power ==========

    #[must_use]
    pub fn power_on(self, index: PowerIndex) -> Self {
        self.push(&PowerCommand::on(index))
    }

    #[must_use]
    pub fn power_off(self, index: PowerIndex) -> Self {
        self.push(&PowerCommand::off(index))
    }

    // ========== Brightness ==========

    /// Sets the brightness of a whole light (`Dimmer`).
    #[must_use]
    pub fn dimmer(self, value: Dimmer) -> Self {
        self.push(&DimmerCommand::Set(value))
    }

    /// Sets the brightness of one half of an unlinked light (`Dimmer<index>`).
    #[must_use]
    pub fn unlinked_dimmer(self, index: u8, value: Dimmer) -> Self {
        self.push(&DimmerCommand::Unlinked { index, value })
    }

    /// Sets the level of a single PWM channel (`Channel<index>`).
    #[must_use]
    pub fn channel(self, index: PowerIndex, value: Dimmer) -> Self {
        self.push(&ChannelCommand::new(index, value))
    }

    // ========== Color ==========

    #[must_use]
    pub fn color(self, color: RgbColor) -> Self {
        self.push(&ColorCommand::Set(color))
    }

    #[must_use]
    pub fn color_temp(self, ct: ColorTemp) -> Self {
        self.push(&ColorTempCommand::Set(ct))
    }

    #[must_use]
    pub fn white(self, level: Dimmer) -> Self {
        self.push(&WhiteCommand::Set(level))
    }

    #[must_use]
    pub fn scheme(self, scheme: Scheme) -> Self {
        self.push(&SchemeCommand::Set(scheme))
    }

    // ========== Build ==========

    /// Builds the batch.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::TooManyCommands` if more than 30 commands were
    /// added.
    pub fn build(self) -> Result<CommandBatch, EncodeError> {
        if self.tokens.len() > MAX_BATCH_COMMANDS {
            return Err(EncodeError::TooManyCommands {
                max: MAX_BATCH_COMMANDS,
                actual: self.tokens.len(),
            });
        }
        Ok(CommandBatch {
            tokens: self.tokens,
        })
    }

    /// Returns the current number of commands in the builder.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no commands have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Appends any command.
    #[must_use]
    pub fn push<C: Command>(mut self, cmd: &C) -> Self {
        self.tokens.push(CommandToken {
            keyword: cmd.name(),
            argument: cmd.payload(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_command_batch() {
        let batch = CommandBatch::builder()
            .power_off(PowerIndex::one())
            .build()
            .unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.to_backlog(), "NoDelay;Power1 OFF");
    }

    #[test]
    fn every_token_gets_no_delay() {
        let batch = CommandBatch::builder()
            .enable_fade()
            .speed(FadeSpeed::new(8).unwrap())
            .dimmer(Dimmer::MAX)
            .build()
            .unwrap();
        assert_eq!(
            batch.to_backlog(),
            "NoDelay;Fade 1;NoDelay;Speed 8;NoDelay;Dimmer 100"
        );
    }

    #[test]
    fn tokens_keep_keyword_and_argument() {
        let batch = CommandBatch::builder()
            .channel(PowerIndex::new(4).unwrap(), Dimmer::new(20).unwrap())
            .build()
            .unwrap();
        let token = &batch.tokens()[0];
        assert_eq!(token.keyword(), "Channel4");
        assert_eq!(token.argument(), Some("20"));
    }

    #[test]
    fn thirty_commands_allowed() {
        let mut builder = CommandBatch::builder();
        for _ in 0..MAX_BATCH_COMMANDS {
            builder = builder.disable_fade();
        }
        assert_eq!(builder.build().unwrap().len(), 30);
    }

    #[test]
    fn too_many_commands_fails() {
        let mut builder = CommandBatch::builder();
        for _ in 0..=MAX_BATCH_COMMANDS {
            builder = builder.power_on(PowerIndex::one());
        }
        assert_eq!(builder.len(), 31);
        assert_eq!(
            builder.build().unwrap_err(),
            EncodeError::TooManyCommands {
                max: 30,
                actual: 31
            }
        );
    }

    #[test]
    fn empty_batch_renders_empty() {
        let batch = CommandBatch::builder().build().unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.to_backlog(), "");
    }
}
