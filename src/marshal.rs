//! The dimension marshal: drag lifecycle state machine and the only object
//! callers and collaborators talk to.
//!
//! DESIGN
//! ======
//! `DimensionMarshal` is a cheap handle over shared state so the deferred
//! collection task can reach the marshal when its frame fires. The task holds
//! only a `Weak` reference; a marshal dropped before the frame leaves the
//! task with nothing to do.
//!
//! Every borrow of internal state is released before collaborator code
//! (watchers, callbacks, the scheduler and its tasks) runs, so a collaborator
//! may call back into the marshal. The two lifecycle calls that would tear
//! the state out from under an in-flight notification are rejected while a
//! callback is being dispatched. A watcher that ends the drag while it is
//! being measured is not rejected; the drag generation is re-checked after
//! every round of watcher calls and the outer operation gives up instead.
//!
//! ERROR HANDLING
//! ==============
//! Calls addressed to ids that were never registered are programmer errors
//! and fail. Channel calls that arrive while no drag is active are stale
//! event deliveries and are dropped without error.

#[cfg(test)]
#[path = "marshal_test.rs"]
mod marshal_test;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use tracing::{debug, warn};

use crate::callbacks::Callbacks;
use crate::collector::{self, CollectionPlan, Collector};
use crate::config::MarshalConfig;
use crate::dimension::{
    CollectOptions, Critical, DraggableDescriptor, DroppableDescriptor, DroppableId, LiftRequest, ScrollOptions,
    StartPublishingResult, Viewport,
};
use crate::error::{Action, MarshalError, Result};
use crate::geometry::Position;
use crate::phase::Phase;
use crate::registry::Registry;
use crate::scheduler::FrameScheduler;
use crate::watcher::{DraggableWatcher, DroppableWatcher};

/// Per-drag bookkeeping.
#[derive(Debug, Default)]
struct DragState {
    phase: Phase,
    collector: Collector,
    /// Bumped on every start and stop so a stale frame task can tell it
    /// belongs to a drag that has ended.
    generation: u64,
    /// Scroll options of the lift, handed to every watched droppable.
    scroll_options: ScrollOptions,
    /// Droppables told to watch their scroll during this drag; told to
    /// unwatch on stop.
    watched: HashSet<DroppableId>,
}

struct Shared {
    config: MarshalConfig,
    callbacks: Rc<dyn Callbacks>,
    scheduler: Rc<dyn FrameScheduler>,
    registry: RefCell<Registry>,
    state: RefCell<DragState>,
    dispatching: Cell<bool>,
}

/// Coordinates dimension collection and update channels for one drag context.
pub struct DimensionMarshal {
    shared: Rc<Shared>,
}

impl DimensionMarshal {
    /// Create a marshal with default configuration.
    #[must_use]
    pub fn new(callbacks: Rc<dyn Callbacks>, scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self::with_config(callbacks, scheduler, MarshalConfig::default())
    }

    #[must_use]
    pub fn with_config(callbacks: Rc<dyn Callbacks>, scheduler: Rc<dyn FrameScheduler>, config: MarshalConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                config,
                callbacks,
                scheduler,
                registry: RefCell::new(Registry::new()),
                state: RefCell::new(DragState::default()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Tear the marshal down, ending any active drag first.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Reentrant`] when called from inside a callback.
    pub fn destroy(self) -> Result<()> {
        self.stop_publishing()
    }

    // --- Registration ---

    /// # Errors
    ///
    /// Returns [`MarshalError::DuplicateRegistration`] if the id is taken.
    pub fn register_draggable(&self, descriptor: DraggableDescriptor, watcher: Rc<dyn DraggableWatcher>) -> Result<()> {
        self.shared.registry.borrow_mut().register_draggable(descriptor, watcher)
    }

    /// # Errors
    ///
    /// Returns [`MarshalError::DuplicateRegistration`] if the id is taken.
    pub fn register_droppable(&self, descriptor: DroppableDescriptor, watcher: Rc<dyn DroppableWatcher>) -> Result<()> {
        self.shared.registry.borrow_mut().register_droppable(descriptor, watcher)
    }

    /// Remove a draggable. Unknown ids are ignored.
    pub fn unregister_draggable(&self, id: &str) {
        self.shared.registry.borrow_mut().unregister_draggable(id);
    }

    /// Remove a droppable. Unknown ids are ignored.
    ///
    /// A droppable removed mid-drag is no longer watched, so a different
    /// droppable registered later under the same id is never told to unwatch.
    pub fn unregister_droppable(&self, id: &str) {
        self.shared.registry.borrow_mut().unregister_droppable(id);
        self.shared.state.borrow_mut().watched.remove(id);
    }

    // --- Drag control ---

    /// Begin publishing for a drag of `request.draggable_id`.
    ///
    /// The lifted draggable and its home droppable are measured before this
    /// returns. `viewport` is the caller's window context and is handed back
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`MarshalError::Reentrant`] from inside a callback.
    /// - [`MarshalError::AlreadyPublishing`] if a drag is active.
    /// - [`MarshalError::UnknownDraggable`] / [`MarshalError::UnknownDroppable`]
    ///   if the draggable or its home droppable is not registered.
    /// - [`MarshalError::Reentrant`] if a watcher ended the drag while the
    ///   critical pair was being measured or watched.
    pub fn start_publishing(&self, request: &LiftRequest, viewport: Viewport) -> Result<StartPublishingResult> {
        self.guard_reentry("start publishing")?;
        if !self.shared.state.borrow().phase.is_idle() {
            return Err(MarshalError::AlreadyPublishing);
        }

        let critical = self.resolve_critical(&request.draggable_id)?;
        let generation = {
            let mut state = self.shared.state.borrow_mut();
            state.generation += 1;
            state.phase = Phase::Collecting { critical: critical.clone() };
            state.scroll_options = request.scroll_options;
            state.generation
        };
        debug!(
            draggable_id = %critical.draggable.id,
            droppable_id = %critical.droppable.id,
            publish_immediately = request.scroll_options.should_publish_immediately,
            "publishing started"
        );

        let measured = collector::collect_critical(&self.shared.registry, &critical);
        if !self.shared.is_current(generation) {
            debug!(draggable_id = %critical.draggable.id, "drag ended while measuring the critical pair");
            return Err(MarshalError::Reentrant { action: "start publishing" });
        }
        let dimensions = match measured {
            Ok(dimensions) => dimensions,
            Err(err) => {
                // A watcher unregistered the critical pair while it was being measured.
                self.shared.reset();
                return Err(err);
            }
        };

        if !self.shared.watch_scroll([critical.droppable.id.clone()], generation) {
            debug!(droppable_id = %critical.droppable.id, "drag ended while watching the home droppable");
            return Err(MarshalError::Reentrant { action: "start publishing" });
        }
        Ok(StartPublishingResult { critical, dimensions: dimensions.into_map(), viewport })
    }

    /// Request a full collection on the next frame.
    ///
    /// Repeated requests before that frame share a single pass; the options
    /// of the latest request win.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::NotPublishing`] when no drag is active.
    pub fn collect(&self, options: CollectOptions) -> Result<()> {
        let generation = {
            let mut state = self.shared.state.borrow_mut();
            if state.phase.is_idle() {
                return Err(MarshalError::NotPublishing { action: "collect dimensions" });
            }
            if state.collector.coalesce(options) {
                debug!(include_critical = options.include_critical, "collection coalesced");
                return Ok(());
            }
            state.generation
        };

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule_once(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.run_collection(generation);
            }
        }));

        let superseded = {
            let mut state = self.shared.state.borrow_mut();
            let superseded = state.generation != generation || state.collector.is_pending();
            if !superseded {
                state.collector.scheduled(handle, options);
            }
            superseded
        };
        if superseded {
            // The scheduler called back into the marshal before returning.
            self.shared.scheduler.cancel(handle);
            debug!(?handle, "collection superseded while scheduling");
            return Ok(());
        }

        debug!(?handle, include_critical = options.include_critical, "collection scheduled");
        Ok(())
    }

    /// End the active drag.
    ///
    /// Cancels any pending collection and clears the critical pair. Does
    /// nothing when no drag is active.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::Reentrant`] when called from inside a callback.
    pub fn stop_publishing(&self) -> Result<()> {
        self.guard_reentry("stop publishing")?;
        if self.shared.state.borrow().phase.is_idle() {
            debug!("stop requested while idle");
            return Ok(());
        }
        self.shared.reset();
        debug!("publishing stopped");
        Ok(())
    }

    // --- Update channels ---

    /// Scroll a droppable's container by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::NotRegistered`] if a drag is active and `id`
    /// is not a registered droppable.
    pub fn scroll_droppable(&self, id: &str, offset: Position) -> Result<()> {
        if self.is_idle() {
            debug!(%id, "ignoring scroll while idle");
            return Ok(());
        }
        let watcher = Rc::clone(&self.shared.registry.borrow().require_droppable(id, Action::Scroll)?.watcher);
        watcher.scroll(offset);
        Ok(())
    }

    /// Report that a droppable has scrolled to `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::NotRegistered`] if a drag is active and `id`
    /// is not a registered droppable.
    pub fn update_droppable_scroll(&self, id: &str, offset: Position) -> Result<()> {
        if self.is_idle() {
            debug!(%id, "ignoring scroll update while idle");
            return Ok(());
        }
        self.shared.registry.borrow().require_droppable(id, Action::UpdateScroll)?;
        self.shared.dispatch(|callbacks| callbacks.update_droppable_scroll(id, offset));
        Ok(())
    }

    /// Report that a droppable was enabled or disabled.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::NotRegistered`] if a drag is active and `id`
    /// is not a registered droppable.
    pub fn update_droppable_is_enabled(&self, id: &str, is_enabled: bool) -> Result<()> {
        if self.is_idle() {
            debug!(%id, "ignoring enabled update while idle");
            return Ok(());
        }
        self.shared.registry.borrow().require_droppable(id, Action::UpdateIsEnabled)?;
        self.shared.dispatch(|callbacks| callbacks.update_droppable_is_enabled(id, is_enabled));
        Ok(())
    }

    // --- Queries ---

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase.clone()
    }

    /// The critical pair of the active drag, if any.
    #[must_use]
    pub fn critical(&self) -> Option<Critical> {
        self.shared.state.borrow().phase.critical().cloned()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.shared.state.borrow().phase.is_idle()
    }

    /// Whether a deferred collection is waiting for its frame.
    #[must_use]
    pub fn is_collection_pending(&self) -> bool {
        self.shared.state.borrow().collector.is_pending()
    }

    #[must_use]
    pub fn config(&self) -> MarshalConfig {
        self.shared.config
    }

    // --- Internals ---

    fn guard_reentry(&self, action: &'static str) -> Result<()> {
        if self.shared.dispatching.get() {
            return Err(MarshalError::Reentrant { action });
        }
        Ok(())
    }

    fn resolve_critical(&self, draggable_id: &str) -> Result<Critical> {
        let registry = self.shared.registry.borrow();
        let draggable = registry
            .draggable(draggable_id)
            .ok_or_else(|| MarshalError::UnknownDraggable(draggable_id.to_owned()))?;
        let home = registry
            .droppable(&draggable.descriptor.droppable_id)
            .ok_or_else(|| MarshalError::UnknownDroppable(draggable.descriptor.droppable_id.clone()))?;
        Ok(Critical { draggable: draggable.descriptor.clone(), droppable: home.descriptor.clone() })
    }
}

impl fmt::Debug for DimensionMarshal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("DimensionMarshal")
            .field("phase", &state.phase)
            .field("pending", &state.collector.is_pending())
            .field("registered", &self.shared.registry.borrow().len())
            .finish()
    }
}

impl Shared {
    /// Body of the deferred frame task.
    fn run_collection(&self, generation: u64) {
        let plan = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation {
                return;
            }
            let Some(critical) = state.phase.critical().cloned() else {
                return;
            };
            let Some(options) = state.collector.take_pending() else {
                return;
            };
            CollectionPlan { critical, options, scope: self.config.scope }
        };

        let started = Instant::now();
        let collection = collector::collect_all(&self.registry, &plan);
        let elapsed = started.elapsed();
        if elapsed > self.config.slow_collection_threshold() {
            warn!(?elapsed, dimensions = collection.dimensions.len(), "slow dimension collection");
        }

        {
            let mut state = self.state.borrow_mut();
            // A watcher may have ended the drag while being measured.
            if state.generation != generation || state.phase.is_idle() {
                debug!("drag ended during collection; dropping result");
                return;
            }
            state.phase = std::mem::take(&mut state.phase).into_watching();
        }

        if !self.watch_scroll(collection.measured_droppables, generation) {
            debug!("drag ended while watching droppables; dropping result");
            return;
        }

        debug!(
            draggables = collection.dimensions.draggables.len(),
            droppables = collection.dimensions.droppables.len(),
            "publishing collection"
        );
        self.dispatch(|callbacks| callbacks.publish(collection.dimensions));
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    /// Tell each still-registered droppable in `ids` to watch its scroll,
    /// once per drag. Returns `false` if a watcher ended the drag.
    fn watch_scroll(&self, ids: impl IntoIterator<Item = DroppableId>, generation: u64) -> bool {
        let options = self.state.borrow().scroll_options;
        for id in ids {
            if !self.is_current(generation) {
                return false;
            }
            let Some(watcher) = self.registry.borrow().droppable(&id).map(|entry| Rc::clone(&entry.watcher)) else {
                continue;
            };
            if !self.state.borrow_mut().watched.insert(id) {
                continue;
            }
            watcher.watch_scroll(options);
        }
        self.is_current(generation)
    }

    /// Return to idle, cancelling pending work and releasing watched droppables.
    fn reset(&self) {
        let (pending, watched) = {
            let mut state = self.state.borrow_mut();
            let pending = state.collector.cancel();
            state.generation += 1;
            state.phase = Phase::Idle;
            (pending, std::mem::take(&mut state.watched))
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }

        for id in watched {
            let Some(watcher) = self.registry.borrow().droppable(&id).map(|entry| Rc::clone(&entry.watcher)) else {
                continue;
            };
            watcher.unwatch_scroll();
        }
    }

    fn dispatch(&self, notify: impl FnOnce(&dyn Callbacks)) {
        let callbacks = Rc::clone(&self.callbacks);
        let previous = self.dispatching.replace(true);
        notify(callbacks.as_ref());
        self.dispatching.set(previous);
    }
}
