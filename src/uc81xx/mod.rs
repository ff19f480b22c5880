//! Shared pieces of the UC81xx controller family
//!
//! Used by the Inkplate 2, the Waveshare 2.13" (B/C) and the Waveshare 7.5" (V2).
//! Each of them still carries its own command order and calibration values.

pub(crate) mod command;

pub(crate) use self::command::{Command, PanelSetting, ResolutionClass, ResolutionFormat};
