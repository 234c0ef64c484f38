use std::{collections::VecDeque, fmt};

use super::{passage::Instruction, Compose, DrawHandle, Drawable};
use crate::layout::Position;

/// Something waiting in a typewriter's queue.
///
/// Drawing instructions are forwarded to the target as-is;
/// waits and callbacks only mean something to the typewriter itself.
pub enum Queued {
    Draw(Instruction),
    /// One tick of delay
    Wait,
    Custom(Box<dyn FnOnce()>),
}

impl fmt::Debug for Queued {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Queued::Draw(instruction) => f.debug_tuple("Draw").field(instruction).finish(),
            Queued::Wait => f.write_str("Wait"),
            Queued::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Why a [`Typewriter::pulse`] returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// A character reached the target
    Revealed(char),
    /// A wait tick was used up
    Waited,
    /// The queue ran out without revealing anything
    Drained,
}

/// Throttles the flow of instructions into a target, one visible character at a time.
///
/// Authoring methods only queue; nothing reaches the target until [`Typewriter::pulse`]
/// (once per frame, typically) or [`Typewriter::flush`] moves it there.
///
/// The target is usually a [`super::passage::Passage`], owned or borrowed
/// (`Typewriter::new(&mut passage)`), but any [`Compose`] will do, including another typewriter.
pub struct Typewriter<S> {
    target: S,
    queue: VecDeque<Queued>,
}

impl<S: Compose> Typewriter<S> {
    pub fn new(target: S) -> Self {
        Self {
            target,
            queue: VecDeque::new(),
        }
    }

    /// Text where every character is preceded by `delay` ticks
    pub fn add_slow_text(&mut self, delay: usize, text: &str) -> &mut Self {
        for ch in text.chars() {
            self.wait(delay);
            self.push(Instruction::Char(ch));
        }
        self
    }

    /// Queues `ticks` separate waits; each pulse consumes one
    pub fn wait(&mut self, ticks: usize) -> &mut Self {
        self.queue.extend((0..ticks).map(|_| Queued::Wait));
        self
    }

    /// Runs `callback` when the queue reaches this point
    pub fn custom(&mut self, callback: impl FnOnce() + 'static) -> &mut Self {
        self.queue.push_back(Queued::Custom(Box::new(callback)));
        self
    }

    /// Applies queued instructions to the target until a character has been
    /// revealed, a wait has been consumed, or the queue is empty.
    pub fn pulse(&mut self) -> Pulse {
        while let Some(queued) = self.queue.pop_front() {
            match queued {
                Queued::Draw(Instruction::Char(ch)) => {
                    log::trace!("revealing {ch:?}");
                    self.target.push(Instruction::Char(ch));
                    return Pulse::Revealed(ch);
                }
                Queued::Draw(instruction) => {
                    log::trace!("forwarding {instruction:?}");
                    self.target.push(instruction);
                }
                Queued::Wait => return Pulse::Waited,
                Queued::Custom(callback) => {
                    log::trace!("running custom callback");
                    callback();
                }
            }
        }
        Pulse::Drained
    }

    /// Pulses until the queue is empty, so everything queued becomes visible at once.
    /// Returns the number of characters revealed.
    pub fn flush(&mut self) -> usize {
        let pending = self.queue.len();
        let mut revealed = 0;
        while !self.queue.is_empty() {
            if let Pulse::Revealed(_) = self.pulse() {
                revealed += 1;
            }
        }
        log::debug!("flushed {pending} queued entries, {revealed} characters revealed");
        revealed
    }

    /// `true` once everything queued has reached the target
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Entries still waiting, counting every wait tick separately
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> impl Iterator<Item = &Queued> {
        self.queue.iter()
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut S {
        &mut self.target
    }

    /// Drops whatever is still queued and hands the target back
    pub fn into_target(self) -> S {
        if !self.queue.is_empty() {
            log::debug!("dropping {} queued entries", self.queue.len());
        }
        self.target
    }
}

impl<S: Compose> Compose for Typewriter<S> {
    fn push(&mut self, instruction: Instruction) -> &mut Self {
        self.queue.push_back(Queued::Draw(instruction));
        self
    }
}

impl<S: Compose> Drawable for Typewriter<S> {
    fn draw_at(&self, handle: &mut DrawHandle, position: Position) {
        self.target.draw_at(handle, position)
    }
}
