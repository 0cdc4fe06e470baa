//! Per-source mouse history.
//!
//! The host pushes samples between ticks with [`MouseInput::push_location`]
//! and [`MouseInput::push_state`]; nothing else is mutated until the drag
//! system reads the buffers on the next tick. Channels are created lazily
//! the first time a source is seen.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use rustc_hash::FxHashMap;

use super::mousebuffer::{DEFAULT_CAPACITY, MouseLocationBuffer, MouseStateBuffer};

/// Bit of the primary (left) button in a state bitmask.
pub const PRIMARY_BUTTON: u32 = 0;

/// Mask for logical button `button`.
pub fn button_mask(button: u32) -> u32 {
    1u32.checked_shl(button).unwrap_or(0)
}

/// Location and button history of one mouse source.
#[derive(Debug, Clone)]
pub struct MouseChannel {
    pub locations: MouseLocationBuffer,
    pub states: MouseStateBuffer,
    /// Buttons as they were at the end of the previous tick.
    pub last_buttons: u32,
}

impl MouseChannel {
    pub fn new(capacity: usize) -> Self {
        Self {
            locations: MouseLocationBuffer::with_capacity(capacity),
            states: MouseStateBuffer::with_capacity(capacity),
            last_buttons: 0,
        }
    }

    /// Most recent cursor location, if any was pushed.
    pub fn cursor(&self) -> Option<Vec2> {
        self.locations.latest().map(|s| s.value)
    }

    /// Most recent button bitmask; no samples means nothing is pressed.
    pub fn buttons(&self) -> u32 {
        self.states.latest().map_or(0, |s| s.value)
    }

    pub fn is_down(&self, button: u32) -> bool {
        self.buttons() & button_mask(button) != 0
    }

    /// Down now but not at the end of the previous tick.
    pub fn just_pressed(&self, button: u32) -> bool {
        self.is_down(button) && self.last_buttons & button_mask(button) == 0
    }
}

/// Resource holding every mouse source's channel.
#[derive(Resource, Debug, Clone)]
pub struct MouseInput {
    channels: FxHashMap<u32, MouseChannel>,
    capacity: usize,
}

impl Default for MouseInput {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MouseInput {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: FxHashMap::default(),
            capacity,
        }
    }

    fn channel_mut(&mut self, source: u32) -> &mut MouseChannel {
        let capacity = self.capacity;
        self.channels.entry(source).or_insert_with(|| {
            debug!("new mouse source {}", source);
            MouseChannel::new(capacity)
        })
    }

    /// Record a cursor location (view space) for `source`.
    pub fn push_location(&mut self, source: u32, timestamp: f64, x: f32, y: f32) -> bool {
        self.channel_mut(source)
            .locations
            .push(source, timestamp, Vec2::new(x, y))
    }

    /// Record a button bitmask for `source`.
    pub fn push_state(&mut self, source: u32, timestamp: f64, buttons: u32) -> bool {
        self.channel_mut(source)
            .states
            .push(source, timestamp, buttons)
    }

    pub fn channel(&self, source: u32) -> Option<&MouseChannel> {
        self.channels.get(&source)
    }

    /// Remember the current buttons of every source for next tick's edge
    /// detection.
    pub fn end_tick(&mut self) {
        for channel in self.channels.values_mut() {
            channel.last_buttons = channel.buttons();
        }
    }

    pub fn sources(&self) -> impl Iterator<Item = u32> + '_ {
        self.channels.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_created_lazily() {
        let mut input = MouseInput::default();
        assert!(input.channel(3).is_none());
        input.push_location(3, 1.0, 0.5, 0.25);
        let channel = input.channel(3).unwrap();
        assert_eq!(channel.cursor(), Some(Vec2::new(0.5, 0.25)));
        assert_eq!(channel.buttons(), 0);
        assert!(input.channel(0).is_none());
    }

    #[test]
    fn test_just_pressed_until_end_of_tick() {
        let mut input = MouseInput::default();
        input.push_state(0, 1.0, button_mask(PRIMARY_BUTTON));
        assert!(input.channel(0).unwrap().just_pressed(PRIMARY_BUTTON));

        input.end_tick();
        let channel = input.channel(0).unwrap();
        assert!(channel.is_down(PRIMARY_BUTTON));
        assert!(!channel.just_pressed(PRIMARY_BUTTON));
    }

    #[test]
    fn test_late_state_sample_does_not_replace_newest() {
        let mut input = MouseInput::default();
        input.push_state(0, 20.0, 0);
        input.push_state(0, 10.0, 1);
        assert_eq!(input.channel(0).unwrap().buttons(), 0);
    }

    #[test]
    fn test_button_mask_bits() {
        assert_eq!(button_mask(0), 1);
        assert_eq!(button_mask(2), 4);
        assert_eq!(button_mask(40), 0);
    }
}
