//=========================================================================
// Transition Queue
//=========================================================================
//
// Command channel for scene transitions.
//
// Scenes request transitions through a cloneable `SceneCommands` handle
// during their updates. The stack drains the queue once per tick, at the
// tick boundary, so a scene never holds a reference back to its stack.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::logger::Logger;

/// Default capacity of a stack's command queue.
pub const DEFAULT_COMMAND_CAPACITY: usize = 16;

//=== SceneCommand ========================================================

/// A stack operation requested by a scene.
pub enum SceneCommand {
    /// Pushes a new scene; it becomes current.
    Push(Box<dyn Scene>),

    /// Pops and tears down the current scene.
    Pop,

    /// Pops the current scene, then pushes the given one.
    Replace(Box<dyn Scene>),

    /// Tears down every scene on the stack.
    Clear,
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(scene) => f.debug_tuple("Push").field(&scene.name()).finish(),
            Self::Pop => f.write_str("Pop"),
            Self::Replace(scene) => f.debug_tuple("Replace").field(&scene.name()).finish(),
            Self::Clear => f.write_str("Clear"),
        }
    }
}

//=== SceneCommands =======================================================

/// Cloneable sender half handed to scenes.
///
/// Every method returns `false` (and logs a warning) when the request
/// could not be queued because the queue is full or the stack is gone.
#[derive(Clone)]
pub struct SceneCommands {
    sender: Sender<SceneCommand>,
    logger: Logger,
}

impl SceneCommands {
    /// Requests that `scene` be pushed on top.
    pub fn push(&self, scene: Box<dyn Scene>) -> bool {
        self.send(SceneCommand::Push(scene))
    }

    /// Requests that the current scene be popped.
    pub fn pop(&self) -> bool {
        self.send(SceneCommand::Pop)
    }

    /// Requests that the current scene be replaced by `scene`.
    pub fn replace(&self, scene: Box<dyn Scene>) -> bool {
        self.send(SceneCommand::Replace(scene))
    }

    /// Requests that every scene be torn down.
    pub fn clear(&self) -> bool {
        self.send(SceneCommand::Clear)
    }

    /// Queues `command` without blocking.
    pub fn send(&self, command: SceneCommand) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                self.logger.warn(format_args!("Scene command queue full, dropping {:?}", command));
                false
            }
            Err(TrySendError::Disconnected(command)) => {
                self.logger.warn(format_args!("Scene stack gone, dropping {:?}", command));
                false
            }
        }
    }
}

impl fmt::Debug for SceneCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneCommands")
            .field("queued", &self.sender.len())
            .finish()
    }
}

//=== CommandQueue ========================================================

/// Receiver side, owned by the stack.
pub(crate) struct CommandQueue {
    sender: Sender<SceneCommand>,
    receiver: Receiver<SceneCommand>,
}

impl CommandQueue {
    /// Creates a bounded queue holding `capacity` commands.
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// A new sender handle logging through `logger`.
    pub(crate) fn handle(&self, logger: Logger) -> SceneCommands {
        SceneCommands {
            sender: self.sender.clone(),
            logger,
        }
    }

    /// Next queued command, if any.
    pub(crate) fn try_next(&self) -> Option<SceneCommand> {
        self.receiver.try_recv().ok()
    }

    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
