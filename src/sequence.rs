//! Command groups and the sequences built from them
//!
//! A [`CommandGroup`] is one opcode followed by its parameters. It is sent as a unit:
//! the opcode with DC low, the parameters with DC high. A [`CommandSequence`] is an
//! ordered list of groups; the busy line has to settle after each group before the
//! next one is sent, unless the group says otherwise.

use core::ops::Deref;

use heapless::Vec;

use crate::error::SequenceError;
use crate::traits::Command;

/// Maximum length of a command group, opcode included
pub const MAX_GROUP_LEN: usize = 16;

/// Maximum number of groups in one sequence
pub const MAX_GROUPS: usize = 24;

/// One opcode plus its parameter bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandGroup {
    bytes: Vec<u8, MAX_GROUP_LEN>,
    /// Poll the busy line after sending
    wait_for_idle: bool,
    /// Fixed delay after sending, before the busy line is looked at
    settle_us: u32,
}

impl CommandGroup {
    /// Build a group from a raw opcode and its parameters
    pub fn new(opcode: u8, data: &[u8]) -> Result<Self, SequenceError> {
        let too_long = SequenceError::GroupTooLong {
            opcode,
            len: data.len() + 1,
        };
        let mut bytes = Vec::new();
        bytes.push(opcode).map_err(|_| too_long)?;
        bytes.extend_from_slice(data).map_err(|_| too_long)?;
        Ok(CommandGroup {
            bytes,
            wait_for_idle: true,
            settle_us: 0,
        })
    }

    /// Send the next group right away instead of waiting for the busy line
    ///
    /// Needed where a command raises busy until a later command has completed,
    /// e.g. Data Stop followed by Display Refresh on the Inkplate 2.
    pub fn without_busy_wait(mut self) -> Self {
        self.wait_for_idle = false;
        self
    }

    /// Wait `settle_us` after sending, before the busy line is polled
    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    pub(crate) fn with_command<C: Command>(command: C, data: &[u8]) -> Result<Self, SequenceError> {
        CommandGroup::new(command.address(), data)
    }

    /// Controller opcode, sent with DC low
    pub fn opcode(&self) -> u8 {
        self.bytes[0]
    }

    /// Parameter bytes, sent with DC high
    pub fn data(&self) -> &[u8] {
        &self.bytes[1..]
    }

    /// Opcode followed by the parameters
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the busy line has to settle before the next group
    pub fn waits_for_idle(&self) -> bool {
        self.wait_for_idle
    }

    /// Fixed delay after sending in microseconds
    pub fn settle_us(&self) -> u32 {
        self.settle_us
    }
}

impl AsRef<[u8]> for CommandGroup {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Ordered command groups, replayed with a busy wait after each one that asks for it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandSequence {
    groups: Vec<CommandGroup, MAX_GROUPS>,
}

impl CommandSequence {
    /// An empty sequence
    pub const fn new() -> Self {
        CommandSequence { groups: Vec::new() }
    }

    /// Append a group
    pub fn push(&mut self, group: CommandGroup) -> Result<(), SequenceError> {
        self.groups
            .push(group)
            .map_err(|_| SequenceError::TooManyGroups)
    }

    pub(crate) fn push_command<C: Command>(
        &mut self,
        command: C,
        data: &[u8],
    ) -> Result<(), SequenceError> {
        self.push(CommandGroup::with_command(command, data)?)
    }

    /// The groups in send order
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }
}

impl Deref for CommandSequence {
    type Target = [CommandGroup];

    fn deref(&self) -> &Self::Target {
        self.groups()
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a CommandGroup;
    type IntoIter = core::slice::Iter<'a, CommandGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_splits_opcode_and_data() {
        let group = CommandGroup::new(0x61, &[0x68, 0x00, 0xD4]).unwrap();
        assert_eq!(group.opcode(), 0x61);
        assert_eq!(group.data(), &[0x68, 0x00, 0xD4]);
        assert_eq!(group.as_bytes(), &[0x61, 0x68, 0x00, 0xD4]);

        let bare = CommandGroup::new(0x04, &[]).unwrap();
        assert_eq!(bare.as_bytes(), &[0x04]);
        assert!(bare.data().is_empty());
        assert!(bare.waits_for_idle());
        assert_eq!(bare.settle_us(), 0);
    }

    #[test]
    fn group_wait_flags() {
        let stop = CommandGroup::new(0x11, &[0x00]).unwrap().without_busy_wait();
        assert!(!stop.waits_for_idle());
        assert_eq!(stop.as_bytes(), &[0x11, 0x00]);

        let refresh = CommandGroup::new(0x12, &[]).unwrap().with_settle_us(500);
        assert!(refresh.waits_for_idle());
        assert_eq!(refresh.settle_us(), 500);
        assert_ne!(refresh, CommandGroup::new(0x12, &[]).unwrap());
    }

    #[test]
    fn group_capacity() {
        let data = [0u8; MAX_GROUP_LEN - 1];
        assert!(CommandGroup::new(0x20, &data).is_ok());

        let data = [0u8; MAX_GROUP_LEN];
        assert_eq!(
            CommandGroup::new(0x20, &data),
            Err(SequenceError::GroupTooLong {
                opcode: 0x20,
                len: MAX_GROUP_LEN + 1
            })
        );
    }

    #[test]
    fn sequence_keeps_order_and_capacity() {
        let mut sequence = CommandSequence::new();
        for opcode in 0..MAX_GROUPS as u8 {
            sequence.push(CommandGroup::new(opcode, &[]).unwrap()).unwrap();
        }
        assert_eq!(sequence.len(), MAX_GROUPS);
        assert!(sequence
            .iter()
            .enumerate()
            .all(|(i, group)| group.opcode() == i as u8));

        assert_eq!(
            sequence.push(CommandGroup::new(0xFF, &[]).unwrap()),
            Err(SequenceError::TooManyGroups)
        );
    }
}
