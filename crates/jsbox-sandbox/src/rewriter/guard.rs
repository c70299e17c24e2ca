//! Scoped push/pop of rewriter frames.

use std::ops::{Deref, DerefMut};

use super::{FunctionFrame, Rewriter};
use crate::scope::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Scope,
    With,
    Function,
}

/// Keeps a frame pushed for as long as it lives.
///
/// Derefs to the [`Rewriter`], so rewriting continues through the guard.
/// Dropping it pops exactly what was pushed, including during unwinding.
pub struct ScopeGuard<'a> {
    rewriter: &'a mut Rewriter,
    frame: Frame,
}

impl Rewriter {
    /// Push a block-level scope (a `catch` variable).
    pub(super) fn enter_scope(&mut self, scope: Scope) -> ScopeGuard<'_> {
        self.scopes.push(scope);
        ScopeGuard {
            rewriter: self,
            frame: Frame::Scope,
        }
    }

    /// Push a `with` body whose object is held in `binding`.
    pub(super) fn enter_with(&mut self, binding: String) -> ScopeGuard<'_> {
        self.scopes.push_with(binding);
        ScopeGuard {
            rewriter: self,
            frame: Frame::With,
        }
    }

    /// Push a function activation (or the program root).
    pub(super) fn enter_function(&mut self, scope: Scope) -> ScopeGuard<'_> {
        self.scopes.push(scope);
        self.functions.push(FunctionFrame::default());
        ScopeGuard {
            rewriter: self,
            frame: Frame::Function,
        }
    }
}

impl ScopeGuard<'_> {
    /// Temporaries allocated so far in this function frame.
    pub(super) fn take_temps(&mut self) -> Vec<String> {
        if self.frame != Frame::Function {
            return Vec::new();
        }
        self.rewriter
            .functions
            .last_mut()
            .map(|frame| std::mem::take(&mut frame.temps))
            .unwrap_or_default()
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Rewriter;

    fn deref(&self) -> &Rewriter {
        self.rewriter
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Rewriter {
        self.rewriter
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        match self.frame {
            Frame::Scope => {
                self.rewriter.scopes.pop();
            }
            Frame::With => {
                self.rewriter.scopes.pop_with();
            }
            Frame::Function => {
                self.rewriter.functions.pop();
                self.rewriter.scopes.pop();
            }
        }
    }
}
