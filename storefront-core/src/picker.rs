//! `LocationPicker`: the state → city modal.
//!
//! Opening the modal always starts from a fresh state list. Picking a state
//! loads its cities and drops any earlier city; the save button only becomes
//! usable once a city is picked. Saving sends both ids and their names to
//! the backend, shows the resolved address, and closes the modal after a
//! short delay.
//!
//! Every open/close starts a new session. Responses that come back for an
//! older session, or city lists for a state that has since been replaced,
//! are dropped.

use crate::backend::{GeoSource, LocationBackend, Platform, PickerView};
use crate::config::WidgetConfig;
use crate::error::SyncError;
use crate::location::{Dropdown, LocationSelection, PickerPhase, Region, SaveLocationRequest};
use crate::messages;
use crate::sync::SyncOutcome;
use crate::toast::Toast;
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Location modal controller. Cheap to clone; clones share state.
pub struct LocationPicker<A, V, P> {
    inner: Rc<PickerInner<A, V, P>>,
}

struct PickerInner<A, V, P> {
    api: A,
    view: V,
    platform: P,
    alert_delay: Duration,
    close_delay: Duration,
    phase: Cell<PickerPhase>,
    selection: RefCell<LocationSelection>,
    states: RefCell<Vec<Region>>,
    cities: RefCell<Vec<Region>>,
    session: Cell<u64>,
    cities_seq: Cell<u64>,
}

impl<A, V, P> Clone for LocationPicker<A, V, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A, V, P> LocationPicker<A, V, P>
where
    A: GeoSource + LocationBackend,
    V: PickerView,
    P: Platform,
{
    pub fn new(api: A, view: V, platform: P, config: &WidgetConfig) -> Self {
        Self {
            inner: Rc::new(PickerInner {
                api,
                view,
                platform,
                alert_delay: config.alert_delay(),
                close_delay: config.close_delay(),
                phase: Cell::new(PickerPhase::Closed),
                selection: RefCell::new(LocationSelection::default()),
                states: RefCell::new(Vec::new()),
                cities: RefCell::new(Vec::new()),
                session: Cell::new(0),
                cities_seq: Cell::new(0),
            }),
        }
    }

    pub fn phase(&self) -> PickerPhase {
        self.inner.phase.get()
    }

    pub fn selection(&self) -> LocationSelection {
        self.inner.selection.borrow().clone()
    }

    pub fn states(&self) -> Vec<Region> {
        self.inner.states.borrow().clone()
    }

    pub fn cities(&self) -> Vec<Region> {
        self.inner.cities.borrow().clone()
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    fn set_phase(&self, phase: PickerPhase) {
        debug!("Location picker: {:?} -> {:?}", self.inner.phase.get(), phase);
        self.inner.phase.set(phase);
    }

    fn new_session(&self) -> u64 {
        let session = self.inner.session.get() + 1;
        self.inner.session.set(session);
        session
    }

    fn is_current(&self, session: u64) -> bool {
        self.inner.session.get() == session
    }

    /// Show the modal and load the state list.
    pub async fn open(&self) -> SyncOutcome {
        let session = self.new_session();
        info!("Opening location picker (session {})", session);
        self.inner.view.set_open(true);
        self.reset_form();
        self.load_states().await
    }

    /// Hide the modal and forget the transient selection.
    pub fn close(&self) {
        self.new_session();
        self.set_phase(PickerPhase::Closed);
        self.inner.view.set_open(false);
        self.reset_form();
    }

    fn reset_form(&self) {
        self.inner.selection.borrow_mut().clear();
        self.inner.cities.borrow_mut().clear();
        let view = &self.inner.view;
        view.show_selection(&LocationSelection::default());
        view.show_cities(Dropdown::city_placeholder());
        view.set_saving(false);
        view.set_save_enabled(false);
        view.show_resolved_address(None);
    }

    pub async fn load_states(&self) -> SyncOutcome {
        let session = self.inner.session.get();
        self.set_phase(PickerPhase::LoadingStates);
        self.inner
            .view
            .show_states(Dropdown::Loading(messages::STATES_LOADING.to_string()));

        let result = self.inner.api.states().await;
        if !self.is_current(session) {
            warn!("Dropping state list from closed session {}", session);
            return SyncOutcome::Superseded;
        }

        match result {
            Ok(states) => {
                info!("Loaded {} states", states.len());
                *self.inner.states.borrow_mut() = states.clone();
                self.inner.view.show_states(Dropdown::Ready {
                    prompt: messages::STATES_PROMPT.to_string(),
                    options: states,
                });
                self.set_phase(PickerPhase::StatesReady);
                SyncOutcome::Applied
            }
            Err(e) => {
                error!("Failed to load states: {}", e);
                self.inner
                    .view
                    .show_states(Dropdown::Failed(messages::STATES_FAILED.to_string()));
                self.set_phase(PickerPhase::StatesUnavailable);
                self.inner.platform.sleep(self.inner.alert_delay).await;
                self.inner.view.alert(messages::STATES_ALERT);
                SyncOutcome::Failed(e)
            }
        }
    }

    /// A state was picked (or the empty option was).
    pub async fn on_state_change(&self, state_id: &str) -> SyncOutcome {
        self.inner.selection.borrow_mut().choose_state(state_id);
        self.inner.cities.borrow_mut().clear();
        let selection = self.selection();
        let view = &self.inner.view;
        view.show_selection(&selection);
        view.set_save_enabled(false);
        view.show_resolved_address(None);

        match selection.state_id() {
            Some(state_id) => self.load_cities(state_id).await,
            None => {
                // invalidate any city list still in flight
                self.inner.cities_seq.set(self.inner.cities_seq.get() + 1);
                view.show_cities(Dropdown::city_placeholder());
                self.set_phase(PickerPhase::StatesReady);
                SyncOutcome::Skipped
            }
        }
    }

    pub async fn load_cities(&self, state_id: &str) -> SyncOutcome {
        let session = self.inner.session.get();
        let seq = self.inner.cities_seq.get() + 1;
        self.inner.cities_seq.set(seq);
        self.set_phase(PickerPhase::LoadingCities);
        self.inner
            .view
            .show_cities(Dropdown::Loading(messages::CITIES_LOADING.to_string()));

        let result = self.inner.api.cities(state_id).await;
        if !self.is_current(session) || self.inner.cities_seq.get() != seq {
            warn!("Dropping city list for state {}", state_id);
            return SyncOutcome::Superseded;
        }

        match result {
            Ok(cities) => {
                info!("Loaded {} cities for state {}", cities.len(), state_id);
                *self.inner.cities.borrow_mut() = cities.clone();
                self.inner.view.show_cities(Dropdown::Ready {
                    prompt: messages::CITIES_PROMPT.to_string(),
                    options: cities,
                });
                self.set_phase(PickerPhase::CitySelectable);
                SyncOutcome::Applied
            }
            Err(e) => {
                error!("Failed to load cities for state {}: {}", state_id, e);
                self.inner
                    .view
                    .show_cities(Dropdown::Failed(messages::CITIES_FAILED.to_string()));
                self.set_phase(PickerPhase::CitiesUnavailable);
                self.inner.platform.sleep(self.inner.alert_delay).await;
                self.inner.view.alert(messages::CITIES_ALERT);
                SyncOutcome::Failed(e)
            }
        }
    }

    pub fn on_city_change(&self, city_id: &str) {
        self.inner.selection.borrow_mut().choose_city(city_id);
        let selection = self.selection();
        let chosen = selection.city_id().is_some();
        self.inner.view.show_selection(&selection);
        self.inner.view.set_save_enabled(chosen);
        self.set_phase(if chosen {
            PickerPhase::CitySelected
        } else {
            PickerPhase::CitySelectable
        });
    }

    /// Persist the selection. Does nothing unless a state and a city are
    /// both selected and no save is already running.
    pub async fn save(&self) -> SyncOutcome {
        if matches!(self.phase(), PickerPhase::Saving | PickerPhase::Saved) {
            debug!("Save already in progress");
            return SyncOutcome::Skipped;
        }
        let selection = self.selection();
        let (Some(state_id), Some(city_id)) = (selection.state_id(), selection.city_id()) else {
            debug!("Save ignored: selection incomplete");
            return SyncOutcome::Skipped;
        };

        let request = {
            let states = self.inner.states.borrow();
            let cities = self.inner.cities.borrow();
            SaveLocationRequest {
                state_id: state_id.to_string(),
                city_id: city_id.to_string(),
                state_name: Region::name_of(&states, state_id)
                    .unwrap_or(state_id)
                    .to_string(),
                city_name: Region::name_of(&cities, city_id)
                    .unwrap_or(city_id)
                    .to_string(),
            }
        };

        let session = self.inner.session.get();
        self.set_phase(PickerPhase::Saving);
        self.inner.view.set_saving(true);
        self.inner.view.set_save_enabled(false);
        info!(
            "Saving location {} / {}",
            request.state_name, request.city_name
        );

        let result = self.inner.api.save_location(&request).await;
        // A new state or city picked mid-save owns the form from then on.
        let unchanged = self.is_current(session) && self.selection() == selection;
        if self.is_current(session) {
            self.inner.view.set_saving(false);
        }

        match result {
            Ok(address) => {
                info!("Location saved: {}", address);
                if unchanged {
                    self.set_phase(PickerPhase::Saved);
                    self.inner.view.show_resolved_address(Some(&address));
                }
                self.inner.view.show_header_location(&address);

                self.inner.platform.sleep(self.inner.close_delay).await;
                if unchanged && self.is_current(session) && self.selection() == selection {
                    self.close();
                }
                self.inner
                    .view
                    .toast(Toast::success(messages::LOCATION_SAVED));
                SyncOutcome::Applied
            }
            Err(e) => {
                error!("Failed to save location: {}", e);
                let text = match (e.server_message(), &e) {
                    (Some(msg), _) => format!("{}{}", messages::LOCATION_SAVE_FAILED_PREFIX, msg),
                    (None, SyncError::Rejected(None)) => messages::LOCATION_SAVE_FAILED_PREFIX
                        .trim_end_matches([' ', ':'])
                        .to_string(),
                    (None, _) => messages::SERVER_UNREACHABLE.to_string(),
                };
                self.inner.view.toast(Toast::error(text));
                if unchanged {
                    self.inner.view.set_save_enabled(true);
                    self.set_phase(PickerPhase::SaveFailed);
                } else {
                    debug!("Selection changed during save, leaving the form as is");
                }
                SyncOutcome::Failed(e)
            }
        }
    }

    /// Show the location saved in an earlier visit. Failures stay silent,
    /// a visitor without a saved location is not an error worth a toast.
    pub async fn load_saved(&self) -> SyncOutcome {
        match self.inner.api.saved_location().await {
            Ok(address) => {
                self.inner.view.show_header_location(&address);
                SyncOutcome::Applied
            }
            Err(e) => {
                warn!("No saved location: {}", e);
                SyncOutcome::Failed(e)
            }
        }
    }

    /// Guard callers may use before issuing requests.
    pub fn check_online(&self) -> bool {
        if self.inner.platform.is_online() {
            return true;
        }
        self.inner
            .view
            .toast(Toast::error(messages::OFFLINE_CHECK));
        false
    }

    /// Connectivity transitions of the browser, reported as toasts only.
    pub fn on_connectivity_change(&self, online: bool) {
        info!("Connectivity changed: online={}", online);
        let toast = if online {
            Toast::success(messages::BACK_ONLINE)
        } else {
            Toast::error(messages::WENT_OFFLINE)
        };
        self.inner.view.toast(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tokio::sync::oneshot;

    type Journal = Rc<RefCell<Vec<String>>>;
    type CitiesReply = oneshot::Receiver<Result<Vec<Region>, SyncError>>;
    type SaveReply = oneshot::Receiver<Result<String, SyncError>>;

    #[derive(Default)]
    struct FakeApi {
        states: RefCell<VecDeque<Result<Vec<Region>, SyncError>>>,
        /// Answers the next states call instead of `states` when set
        states_later: RefCell<Option<CitiesReply>>,
        cities: RefCell<VecDeque<CitiesReply>>,
        city_calls: RefCell<Vec<String>>,
        saves: RefCell<VecDeque<Result<String, SyncError>>>,
        saves_later: RefCell<Option<SaveReply>>,
        save_calls: RefCell<Vec<SaveLocationRequest>>,
        saved: RefCell<Option<Result<String, SyncError>>>,
    }

    impl FakeApi {
        fn cities_later(&self) -> oneshot::Sender<Result<Vec<Region>, SyncError>> {
            let (tx, rx) = oneshot::channel();
            self.cities.borrow_mut().push_back(rx);
            tx
        }

        fn cities_now(&self, reply: Result<Vec<Region>, SyncError>) {
            let _ = self.cities_later().send(reply);
        }

        fn states_later(&self) -> oneshot::Sender<Result<Vec<Region>, SyncError>> {
            let (tx, rx) = oneshot::channel();
            *self.states_later.borrow_mut() = Some(rx);
            tx
        }

        fn save_later(&self) -> oneshot::Sender<Result<String, SyncError>> {
            let (tx, rx) = oneshot::channel();
            *self.saves_later.borrow_mut() = Some(rx);
            tx
        }
    }

    impl GeoSource for FakeApi {
        async fn states(&self) -> Result<Vec<Region>, SyncError> {
            let pending = self.states_later.borrow_mut().take();
            if let Some(rx) = pending {
                return rx.await.expect("states sender dropped");
            }
            self.states
                .borrow_mut()
                .pop_front()
                .expect("unexpected states call")
        }

        async fn cities(&self, state_id: &str) -> Result<Vec<Region>, SyncError> {
            self.city_calls.borrow_mut().push(state_id.to_string());
            let rx = self
                .cities
                .borrow_mut()
                .pop_front()
                .expect("unexpected cities call");
            rx.await.expect("cities sender dropped")
        }
    }

    impl LocationBackend for FakeApi {
        async fn save_location(&self, request: &SaveLocationRequest) -> Result<String, SyncError> {
            self.save_calls.borrow_mut().push(request.clone());
            let pending = self.saves_later.borrow_mut().take();
            if let Some(rx) = pending {
                return rx.await.expect("save sender dropped");
            }
            self.saves
                .borrow_mut()
                .pop_front()
                .expect("unexpected save call")
        }

        async fn saved_location(&self) -> Result<String, SyncError> {
            self.saved
                .borrow_mut()
                .take()
                .expect("unexpected saved_location call")
        }
    }

    #[derive(Default)]
    struct RecordingView {
        journal: Journal,
        open: Cell<bool>,
        states: RefCell<Vec<Dropdown>>,
        cities: RefCell<Vec<Dropdown>>,
        selection: RefCell<LocationSelection>,
        save_enabled: Cell<bool>,
        saving: Cell<bool>,
        resolved: RefCell<Option<String>>,
        header: RefCell<Option<String>>,
        toasts: RefCell<Vec<Toast>>,
    }

    impl PickerView for RecordingView {
        fn set_open(&self, open: bool) {
            self.open.set(open);
        }
        fn show_states(&self, dropdown: Dropdown) {
            self.states.borrow_mut().push(dropdown);
        }
        fn show_cities(&self, dropdown: Dropdown) {
            self.cities.borrow_mut().push(dropdown);
        }
        fn show_selection(&self, selection: &LocationSelection) {
            *self.selection.borrow_mut() = selection.clone();
        }
        fn set_save_enabled(&self, enabled: bool) {
            self.save_enabled.set(enabled);
        }
        fn set_saving(&self, saving: bool) {
            self.saving.set(saving);
        }
        fn show_resolved_address(&self, address: Option<&str>) {
            *self.resolved.borrow_mut() = address.map(str::to_string);
        }
        fn show_header_location(&self, address: &str) {
            *self.header.borrow_mut() = Some(address.to_string());
        }
        fn toast(&self, toast: Toast) {
            self.journal.borrow_mut().push(format!("toast {}", toast.message));
            self.toasts.borrow_mut().push(toast);
        }
        fn alert(&self, message: &str) {
            self.journal.borrow_mut().push(format!("alert {}", message));
        }
    }

    struct FakePlatform {
        journal: Journal,
        online: Cell<bool>,
        /// Holds the next sleep until fired
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl Platform for FakePlatform {
        async fn sleep(&self, duration: Duration) {
            self.journal
                .borrow_mut()
                .push(format!("sleep {}ms", duration.as_millis()));
            let gate = self.gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
        }
        fn is_online(&self) -> bool {
            self.online.get()
        }
    }

    type TestPicker = LocationPicker<FakeApi, RecordingView, FakePlatform>;

    fn region(id: &str, name: &str) -> Region {
        Region {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn picker() -> TestPicker {
        let journal: Journal = Rc::default();
        let view = RecordingView {
            journal: Rc::clone(&journal),
            ..RecordingView::default()
        };
        let platform = FakePlatform {
            journal,
            online: Cell::new(true),
            gate: RefCell::new(None),
        };
        LocationPicker::new(FakeApi::default(), view, platform, &WidgetConfig::default())
    }

    async fn opened() -> TestPicker {
        let picker = picker();
        picker.api().states.borrow_mut().push_back(Ok(vec![
            region("1", "تهران"),
            region("2", "البرز"),
        ]));
        assert_eq!(picker.open().await, SyncOutcome::Applied);
        picker
    }

    async fn with_city_selected() -> TestPicker {
        let picker = opened().await;
        picker
            .api()
            .cities_now(Ok(vec![region("5", "شمیرانات"), region("6", "ری")]));
        picker.on_state_change("1").await;
        picker.on_city_change("5");
        picker
    }

    #[tokio::test]
    async fn test_open_loads_states() {
        let picker = opened().await;
        let view = picker.view();
        assert!(view.open.get());
        assert_eq!(picker.phase(), PickerPhase::StatesReady);
        let states = view.states.borrow();
        assert_eq!(states[0], Dropdown::Loading(messages::STATES_LOADING.to_string()));
        assert_eq!(states.last().unwrap().options().len(), 2);
        assert_eq!(*view.cities.borrow().last().unwrap(), Dropdown::city_placeholder());
        assert!(!view.save_enabled.get());
    }

    #[tokio::test]
    async fn test_malformed_states_show_error_then_alert() {
        let picker = picker();
        picker
            .api()
            .states
            .borrow_mut()
            .push_back(Err(SyncError::Malformed("expected a JSON array".to_string())));

        let outcome = picker.open().await;

        assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Malformed(_))));
        assert_eq!(picker.phase(), PickerPhase::StatesUnavailable);
        assert_eq!(
            *picker.view().states.borrow().last().unwrap(),
            Dropdown::Failed(messages::STATES_FAILED.to_string())
        );
        assert_eq!(
            *picker.view().journal.borrow(),
            vec![
                "sleep 500ms".to_string(),
                format!("alert {}", messages::STATES_ALERT),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_state_clears_city_and_disables_save() {
        let picker = with_city_selected().await;
        assert!(picker.view().save_enabled.get());
        assert_eq!(picker.phase(), PickerPhase::CitySelected);

        picker.api().cities_now(Ok(vec![region("9", "کرج")]));
        picker.on_state_change("2").await;

        let selection = picker.selection();
        assert_eq!(selection.state_id(), Some("2"));
        assert_eq!(selection.city_id(), None);
        assert_eq!(picker.view().selection.borrow().city_id(), None);
        assert!(!picker.view().save_enabled.get());
        assert_eq!(picker.phase(), PickerPhase::CitySelectable);
        assert_eq!(*picker.api().city_calls.borrow(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_empty_state_resets_cities_without_request() {
        let picker = opened().await;
        assert_eq!(picker.on_state_change("").await, SyncOutcome::Skipped);
        assert!(picker.api().city_calls.borrow().is_empty());
        assert_eq!(
            *picker.view().cities.borrow().last().unwrap(),
            Dropdown::city_placeholder()
        );
        assert_eq!(picker.phase(), PickerPhase::StatesReady);
    }

    #[tokio::test]
    async fn test_empty_city_disables_save() {
        let picker = with_city_selected().await;
        picker.on_city_change("");
        assert!(!picker.view().save_enabled.get());
        assert_eq!(picker.phase(), PickerPhase::CitySelectable);
    }

    #[tokio::test]
    async fn test_save_requires_state_and_city() {
        let picker = opened().await;
        assert_eq!(picker.save().await, SyncOutcome::Skipped);

        picker.api().cities_now(Ok(vec![region("5", "شمیرانات")]));
        picker.on_state_change("1").await;
        assert_eq!(picker.save().await, SyncOutcome::Skipped);
        assert!(picker.api().save_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_save_keeps_modal_open() {
        let picker = with_city_selected().await;
        picker
            .api()
            .saves
            .borrow_mut()
            .push_back(Err(SyncError::Rejected(Some("X".to_string()))));

        let outcome = picker.save().await;

        assert!(matches!(outcome, SyncOutcome::Failed(_)));
        let view = picker.view();
        assert_eq!(
            *view.toasts.borrow(),
            vec![Toast::error("خطا در ذخیره موقعیت: X")]
        );
        assert!(view.save_enabled.get());
        assert!(!view.saving.get());
        assert!(view.open.get());
        assert_eq!(picker.phase(), PickerPhase::SaveFailed);
        assert!(picker.selection().is_complete());
    }

    #[tokio::test]
    async fn test_transport_failure_on_save_is_generic() {
        let picker = with_city_selected().await;
        picker
            .api()
            .saves
            .borrow_mut()
            .push_back(Err(SyncError::Status(500)));
        picker.save().await;
        assert_eq!(
            *picker.view().toasts.borrow(),
            vec![Toast::error(messages::SERVER_UNREACHABLE)]
        );
    }

    #[tokio::test]
    async fn test_successful_save_closes_after_delay() {
        let picker = with_city_selected().await;
        picker
            .api()
            .saves
            .borrow_mut()
            .push_back(Ok("تهران، شمیرانات".to_string()));

        assert_eq!(picker.save().await, SyncOutcome::Applied);

        assert_eq!(
            *picker.api().save_calls.borrow(),
            vec![SaveLocationRequest {
                state_id: "1".to_string(),
                city_id: "5".to_string(),
                state_name: "تهران".to_string(),
                city_name: "شمیرانات".to_string(),
            }]
        );
        let view = picker.view();
        assert_eq!(view.header.borrow().as_deref(), Some("تهران، شمیرانات"));
        assert!(!view.open.get());
        assert_eq!(picker.phase(), PickerPhase::Closed);
        assert!(!picker.selection().is_complete());
        assert_eq!(
            *view.journal.borrow(),
            vec![
                "sleep 2000ms".to_string(),
                format!("toast {}", messages::LOCATION_SAVED),
            ]
        );
    }

    #[tokio::test]
    async fn test_stale_city_list_is_dropped() {
        let picker = opened().await;
        let slow = picker.api().cities_later();
        let fast = picker.api().cities_later();

        let (first, second, _) = tokio::join!(
            picker.on_state_change("1"),
            picker.on_state_change("2"),
            async {
                let _ = fast.send(Ok(vec![region("9", "کرج")]));
                tokio::task::yield_now().await;
                let _ = slow.send(Ok(vec![region("5", "شمیرانات")]));
            }
        );

        assert_eq!(first, SyncOutcome::Superseded);
        assert_eq!(second, SyncOutcome::Applied);
        assert_eq!(picker.cities(), vec![region("9", "کرج")]);
        assert_eq!(picker.selection().state_id(), Some("2"));
    }

    #[tokio::test]
    async fn test_failed_city_list_shows_error_then_alert() {
        let picker = opened().await;
        picker
            .api()
            .cities_now(Err(SyncError::Transport("offline".to_string())));

        let outcome = picker.on_state_change("1").await;

        assert!(matches!(outcome, SyncOutcome::Failed(SyncError::Transport(_))));
        assert_eq!(picker.phase(), PickerPhase::CitiesUnavailable);
        assert_eq!(
            *picker.view().cities.borrow().last().unwrap(),
            Dropdown::Failed(messages::CITIES_FAILED.to_string())
        );
        assert!(!picker.view().save_enabled.get());
        assert_eq!(
            *picker.view().journal.borrow(),
            vec![
                "sleep 500ms".to_string(),
                format!("alert {}", messages::CITIES_ALERT),
            ]
        );
    }

    #[tokio::test]
    async fn test_states_arriving_after_close_are_dropped() {
        let picker = picker();
        let reply = picker.api().states_later();

        let (outcome, _) = tokio::join!(picker.open(), async {
            picker.close();
            let _ = reply.send(Ok(vec![region("1", "تهران")]));
        });

        assert_eq!(outcome, SyncOutcome::Superseded);
        assert_eq!(picker.phase(), PickerPhase::Closed);
        assert!(picker.states().is_empty());
        assert!(!picker.view().open.get());
        assert!(picker
            .view()
            .states
            .borrow()
            .iter()
            .all(|dropdown| dropdown.options().is_empty()));
    }

    #[tokio::test]
    async fn test_failed_save_after_state_change_keeps_save_disabled() {
        let picker = with_city_selected().await;
        let reply = picker.api().save_later();
        let cities = picker.api().cities_later();

        let (saved, changed, _) = tokio::join!(
            picker.save(),
            picker.on_state_change("2"),
            async {
                tokio::task::yield_now().await;
                let _ = reply.send(Err(SyncError::Rejected(Some("X".to_string()))));
                tokio::task::yield_now().await;
                let _ = cities.send(Ok(vec![region("9", "کرج")]));
            }
        );

        assert!(matches!(saved, SyncOutcome::Failed(_)));
        assert_eq!(changed, SyncOutcome::Applied);
        let view = picker.view();
        assert_eq!(picker.selection().city_id(), None);
        assert!(!view.save_enabled.get());
        assert!(!view.saving.get());
        assert_eq!(picker.phase(), PickerPhase::CitySelectable);
        assert_eq!(
            *view.toasts.borrow(),
            vec![Toast::error("خطا در ذخیره موقعیت: X")]
        );
    }

    #[tokio::test]
    async fn test_reopened_modal_survives_pending_post_save_close() {
        let picker = with_city_selected().await;
        picker
            .api()
            .saves
            .borrow_mut()
            .push_back(Ok("تهران، شمیرانات".to_string()));
        picker
            .api()
            .states
            .borrow_mut()
            .push_back(Ok(vec![region("1", "تهران")]));
        let (timer, fired) = oneshot::channel();
        *picker.inner.platform.gate.borrow_mut() = Some(fired);

        let (saved, reopened) = tokio::join!(picker.save(), async {
            tokio::task::yield_now().await;
            picker.close();
            let outcome = picker.open().await;
            let _ = timer.send(());
            outcome
        });

        assert_eq!(saved, SyncOutcome::Applied);
        assert_eq!(reopened, SyncOutcome::Applied);
        assert!(picker.view().open.get());
        assert_eq!(picker.phase(), PickerPhase::StatesReady);
        assert_eq!(
            picker.view().toasts.borrow().last(),
            Some(&Toast::success(messages::LOCATION_SAVED))
        );
    }

    #[tokio::test]
    async fn test_close_resets_form() {
        let picker = with_city_selected().await;
        picker.close();
        assert_eq!(picker.phase(), PickerPhase::Closed);
        assert!(!picker.view().open.get());
        assert_eq!(picker.selection(), LocationSelection::default());
        assert!(!picker.view().save_enabled.get());
        assert_eq!(
            *picker.view().cities.borrow().last().unwrap(),
            Dropdown::city_placeholder()
        );
    }

    #[tokio::test]
    async fn test_load_saved_updates_header_silently() {
        let picker = picker();
        *picker.api().saved.borrow_mut() = Some(Ok("تهران، ری".to_string()));
        assert_eq!(picker.load_saved().await, SyncOutcome::Applied);
        assert_eq!(picker.view().header.borrow().as_deref(), Some("تهران، ری"));

        *picker.api().saved.borrow_mut() = Some(Err(SyncError::Status(404)));
        picker.load_saved().await;
        assert!(picker.view().toasts.borrow().is_empty());
    }

    #[test]
    fn test_connectivity_toasts() {
        let picker = picker();
        assert!(picker.check_online());
        picker.inner.platform.online.set(false);
        assert!(!picker.check_online());
        picker.on_connectivity_change(true);
        assert_eq!(
            *picker.view().toasts.borrow(),
            vec![
                Toast::error(messages::OFFLINE_CHECK),
                Toast::success(messages::BACK_ONLINE),
            ]
        );
    }
}
