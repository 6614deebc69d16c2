use crate::engine::Arrangement;
use crate::view::ActionView;
use actionbar_core::{ActionBarError, Event, Result, Signal};
use serde::Serialize;
use tracing::{debug, info};

/// Which view the bar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "depth", rename_all = "lowercase")]
pub enum BarState {
    Base,
    Contextual(usize),
}

/// A base view with a LIFO stack of contextual views on top.
///
/// Only the top of the stack is rendered. Every view keeps its own cached
/// layout, so pushing and popping never disturbs the views underneath.
#[derive(Debug, Clone)]
pub struct ActionBar {
    base: ActionView,
    contextual: Vec<ActionView>,
    /// Last width reported by the host, replayed onto newly revealed views.
    width: Option<f32>,
}

impl ActionBar {
    pub fn new(base: ActionView) -> Self {
        Self {
            base,
            contextual: Vec::new(),
            width: None,
        }
    }

    pub fn state(&self) -> BarState {
        match self.contextual.len() {
            0 => BarState::Base,
            depth => BarState::Contextual(depth),
        }
    }

    pub fn depth(&self) -> usize {
        self.contextual.len()
    }

    pub fn base(&self) -> &ActionView {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ActionView {
        &mut self.base
    }

    /// The view currently on screen.
    pub fn current(&self) -> &ActionView {
        self.contextual.last().unwrap_or(&self.base)
    }

    pub fn current_mut(&mut self) -> &mut ActionView {
        self.contextual.last_mut().unwrap_or(&mut self.base)
    }

    /// The arrangement currently on screen, once a width is known.
    pub fn arrangement(&self) -> Option<&Arrangement> {
        self.current().arrangement()
    }

    /// Lay the visible view out for a new container width.
    pub fn on_width_changed(&mut self, width: f32) -> &Arrangement {
        self.width = Some(width);
        self.current_mut().on_width_changed(width)
    }

    /// Show `view` in place of whatever is on screen.
    pub fn push_contextual_view(&mut self, view: ActionView) -> Event {
        self.contextual.push(view);
        let depth = self.contextual.len();
        info!(depth, "Contextual view pushed");
        self.render_current();
        Event::Pushed { depth }
    }

    /// Remove the top contextual view and reveal the one beneath it.
    ///
    /// The base view can never be popped; asking to is a caller error and
    /// leaves the bar unchanged.
    pub fn pop(&mut self) -> Result<ActionView> {
        let view = self.contextual.pop().ok_or(ActionBarError::StackUnderflow)?;
        info!(depth = self.contextual.len(), "Contextual view popped");
        self.render_current();
        Ok(view)
    }

    /// Route a host signal. Returns the event to surface, if any.
    ///
    /// Activating the leading entry raises [`Event::Previous`] on the base view
    /// and dismisses the view on a contextual one.
    pub fn handle(&mut self, signal: Signal) -> Result<Option<Event>> {
        match signal {
            Signal::Activated(id) if self.current().is_leading(&id) => {
                if self.contextual.is_empty() {
                    Ok(Some(Event::Previous))
                } else {
                    self.pop()?;
                    Ok(Some(Event::Back { depth: self.depth() }))
                }
            }
            Signal::Activated(id) => {
                debug!(%id, "Activation left to the host");
                Ok(None)
            }
            Signal::Back => {
                self.pop()?;
                Ok(Some(Event::Back { depth: self.depth() }))
            }
            Signal::Done => {
                self.pop()?;
                Ok(Some(Event::Done { depth: self.depth() }))
            }
        }
    }

    fn render_current(&mut self) {
        if let Some(width) = self.width {
            self.current_mut().on_width_changed(width);
        }
    }
}
