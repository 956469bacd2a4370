// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BoardConfig, Confirmation, ConfirmationRequest, MutationError, Notice, PushChannel,
    RegistrationRequest, ReservationSurface, ShiftBoard, ShiftGateway, TransportError,
};
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use shiftboard_domain::{
    AttendanceOutcome, Mission, MissionId, Registration, ShiftDetail, ShiftId, ShiftListing,
    ShiftSnapshot, VolunteerId, VolunteerProfile, WarningKind,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use time::macros::{date, time};
use tokio::sync::Notify;

pub type TestBoard = ShiftBoard<FakeGateway, FakeChannel, ScriptedSurface>;
pub type PushSender = UnboundedSender<Result<String, TransportError>>;

pub const VOLUNTEER: VolunteerId = VolunteerId::new(7);

pub fn create_test_mission(id: i64) -> Mission {
    Mission {
        id: MissionId::new(id),
        title: format!("Food bank run {id}"),
        date: date!(2026 - 11 - 14),
        location: String::from("Warehouse 4"),
        visible: true,
        publish_at: None,
    }
}

pub fn create_test_snapshot(id: i64, max_slots: i64, total_registrations: i64) -> ShiftSnapshot {
    ShiftSnapshot::new(ShiftId::new(id), max_slots, total_registrations)
        .with_schedule(MissionId::new(1), time!(9:00), time!(12:00))
        .with_hours(3.0)
}

pub fn create_test_listing(snapshot: ShiftSnapshot, registered: bool) -> ShiftListing {
    let registration: Option<Registration> = registered.then(|| Registration {
        shift_id: snapshot.id,
        volunteer_id: VOLUNTEER,
        hour_eligible: true,
        counts_against_reserve: false,
        note: None,
        attended: false,
    });
    ShiftListing {
        mission: create_test_mission(snapshot.mission_id.map_or(1, |m| m.value())),
        snapshot,
        registration,
    }
}

pub fn snapshot_json(snapshot: &ShiftSnapshot) -> String {
    serde_json::to_string(snapshot).unwrap()
}

/// Polls `check` until it holds, failing the test after two seconds.
pub async fn wait_until(mut check: impl AsyncFnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !check().await {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    FetchListings(VolunteerId),
    FetchDetail(ShiftId),
    Register(RegistrationRequest),
    Unregister(ShiftId, VolunteerId),
    ValidateAttendance(ShiftId, VolunteerId),
}

/// A gateway serving canned listings and recording every call.
#[derive(Debug, Default)]
pub struct FakeGateway {
    listings: Mutex<Vec<ShiftListing>>,
    fetch_error: Mutex<Option<String>>,
    detail_error: Mutex<Option<String>>,
    mutation_error: Mutex<Option<String>>,
    hours_credited: Mutex<f64>,
    calls: Mutex<Vec<GatewayCall>>,
    hold_mutations: Mutex<bool>,
    pub mutation_started: Arc<Notify>,
    pub release_mutation: Arc<Notify>,
    hold_fetches: Mutex<bool>,
    pub fetch_started: Arc<Notify>,
    pub release_fetch: Arc<Notify>,
}

impl FakeGateway {
    pub fn new(listings: Vec<ShiftListing>) -> Self {
        let gateway: Self = Self::default();
        gateway.set_listings(listings);
        gateway
    }

    pub fn set_listings(&self, listings: Vec<ShiftListing>) {
        *self.listings.lock().unwrap() = listings;
    }

    pub fn fail_fetch(&self, message: Option<&str>) {
        *self.fetch_error.lock().unwrap() = message.map(String::from);
    }

    pub fn fail_detail(&self, message: Option<&str>) {
        *self.detail_error.lock().unwrap() = message.map(String::from);
    }

    pub fn fail_mutations(&self, message: Option<&str>) {
        *self.mutation_error.lock().unwrap() = message.map(String::from);
    }

    pub fn credit_hours(&self, hours: f64) {
        *self.hours_credited.lock().unwrap() = hours;
    }

    /// Makes register/unregister wait for `release_mutation`.
    pub fn hold_mutations(&self) {
        *self.hold_mutations.lock().unwrap() = true;
    }

    /// Makes listing fetches wait for `release_fetch`.
    pub fn hold_fetches(&self) {
        *self.hold_fetches.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutation_calls(&self) -> Vec<GatewayCall> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    GatewayCall::Register(_) | GatewayCall::Unregister(_, _)
                )
            })
            .collect()
    }

    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::FetchListings(_)))
            .count()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn mutate(&self, call: GatewayCall) -> Result<(), MutationError> {
        self.record(call);
        let hold: bool = *self.hold_mutations.lock().unwrap();
        if hold {
            self.mutation_started.notify_one();
            self.release_mutation.notified().await;
        }
        let error: Option<String> = self.mutation_error.lock().unwrap().clone();
        error.map_or(Ok(()), |message| Err(MutationError::new(message)))
    }
}

impl ShiftGateway for FakeGateway {
    async fn fetch_listings(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<Vec<ShiftListing>, TransportError> {
        self.record(GatewayCall::FetchListings(volunteer_id));
        let hold: bool = *self.hold_fetches.lock().unwrap();
        if hold {
            self.fetch_started.notify_one();
            self.release_fetch.notified().await;
        }
        let error: Option<String> = self.fetch_error.lock().unwrap().clone();
        if let Some(message) = error {
            return Err(TransportError::new(message));
        }
        Ok(self.listings.lock().unwrap().clone())
    }

    async fn fetch_detail(&self, shift_id: ShiftId) -> Result<ShiftDetail, TransportError> {
        self.record(GatewayCall::FetchDetail(shift_id));
        let error: Option<String> = self.detail_error.lock().unwrap().clone();
        if let Some(message) = error {
            return Err(TransportError::new(message));
        }
        self.listings
            .lock()
            .unwrap()
            .iter()
            .find(|listing| listing.snapshot.id == shift_id)
            .map(|listing| ShiftDetail {
                mission: listing.mission.clone(),
                snapshot: listing.snapshot.clone(),
            })
            .ok_or_else(|| TransportError::new("Shift not found"))
    }

    async fn register(&self, request: RegistrationRequest) -> Result<(), MutationError> {
        self.mutate(GatewayCall::Register(request)).await
    }

    async fn unregister(
        &self,
        shift_id: ShiftId,
        volunteer_id: VolunteerId,
    ) -> Result<(), MutationError> {
        self.mutate(GatewayCall::Unregister(shift_id, volunteer_id))
            .await
    }

    async fn validate_attendance(
        &self,
        shift_id: ShiftId,
        volunteer_id: VolunteerId,
    ) -> Result<AttendanceOutcome, MutationError> {
        self.record(GatewayCall::ValidateAttendance(shift_id, volunteer_id));
        let error: Option<String> = self.mutation_error.lock().unwrap().clone();
        if let Some(message) = error {
            return Err(MutationError::new(message));
        }
        Ok(AttendanceOutcome {
            shift_id,
            volunteer_id,
            hours_credited: *self.hours_credited.lock().unwrap(),
        })
    }
}

/// A push channel handing out one queued connection per `open`.
#[derive(Debug, Default)]
pub struct FakeChannel {
    connections: Mutex<VecDeque<UnboundedReceiver<Result<String, TransportError>>>>,
    open_error: Mutex<Option<String>>,
    hold_open: Mutex<bool>,
    opens: AtomicUsize,
    pub open_started: Arc<Notify>,
    pub release_open: Arc<Notify>,
}

impl FakeChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a connection and returns its sending side.
    pub fn connect(&self) -> PushSender {
        let (sender, receiver) = unbounded();
        self.connections.lock().unwrap().push_back(receiver);
        sender
    }

    pub fn fail_open(&self, message: Option<&str>) {
        *self.open_error.lock().unwrap() = message.map(String::from);
    }

    /// Makes `open` wait for `release_open`.
    pub fn hold_open(&self) {
        *self.hold_open.lock().unwrap() = true;
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }
}

impl PushChannel for FakeChannel {
    type Stream = UnboundedReceiver<Result<String, TransportError>>;

    async fn open(&self, topic: &str) -> Result<Self::Stream, TransportError> {
        assert_eq!(topic, "shifts");
        self.opens.fetch_add(1, Ordering::SeqCst);
        let hold: bool = *self.hold_open.lock().unwrap();
        if hold {
            self.open_started.notify_one();
            self.release_open.notified().await;
        }
        let error: Option<String> = self.open_error.lock().unwrap().clone();
        if let Some(message) = error {
            return Err(TransportError::new(message));
        }
        self.connections
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::new("No connection available"))
    }
}

/// A surface answering from scripted queues and recording what it showed.
///
/// With empty queues every confirmation is accepted without a note and
/// every warning is acknowledged.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    confirmations: Mutex<VecDeque<Confirmation>>,
    acknowledgements: Mutex<VecDeque<bool>>,
    requests: Mutex<Vec<ConfirmationRequest>>,
    warnings: Mutex<Vec<WarningKind>>,
    notices: Mutex<Vec<Notice>>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, confirmation: Confirmation) {
        self.confirmations.lock().unwrap().push_back(confirmation);
    }

    pub fn acknowledge_with(&self, proceed: bool) {
        self.acknowledgements.lock().unwrap().push_back(proceed);
    }

    pub fn requests(&self) -> Vec<ConfirmationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<WarningKind> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl ReservationSurface for ScriptedSurface {
    async fn confirm(&self, request: &ConfirmationRequest) -> Confirmation {
        self.requests.lock().unwrap().push(request.clone());
        self.confirmations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Confirmation::Confirmed { note: None })
    }

    async fn acknowledge(&self, warning: WarningKind) -> bool {
        self.warnings.lock().unwrap().push(warning);
        self.acknowledgements
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(true)
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

/// A board with its fakes and one queued push connection.
pub struct Harness {
    pub board: TestBoard,
    pub gateway: Arc<FakeGateway>,
    pub channel: Arc<FakeChannel>,
    pub surface: Arc<ScriptedSurface>,
    pub push: PushSender,
}

impl Harness {
    pub fn new(listings: Vec<ShiftListing>) -> Self {
        Self::for_volunteer(VolunteerProfile::new(VOLUNTEER, false), listings)
    }

    pub fn for_volunteer(volunteer: VolunteerProfile, listings: Vec<ShiftListing>) -> Self {
        let gateway: Arc<FakeGateway> = Arc::new(FakeGateway::new(listings));
        let channel: Arc<FakeChannel> = Arc::new(FakeChannel::new());
        let surface: Arc<ScriptedSurface> = Arc::new(ScriptedSurface::new());
        let push: PushSender = channel.connect();
        let board: TestBoard = ShiftBoard::new(
            volunteer,
            Arc::clone(&gateway),
            Arc::clone(&channel),
            Arc::clone(&surface),
            BoardConfig::default(),
        );
        Self {
            board,
            gateway,
            channel,
            surface,
            push,
        }
    }

    /// Mounts the board and waits for the feed to go live.
    pub async fn mount(&self) {
        self.board.mount().await.unwrap();
        wait_until(async || self.board.feed_status().await == Some(crate::FeedStatus::Live)).await;
    }

    pub fn send(&self, snapshot: &ShiftSnapshot) {
        self.push.unbounded_send(Ok(snapshot_json(snapshot))).unwrap();
    }

    pub async fn available_label(&self, shift_id: i64) -> Option<String> {
        self.board
            .document()
            .await
            .fragment(ShiftId::new(shift_id))
            .map(|fragment| fragment.available_label.clone())
    }
}
