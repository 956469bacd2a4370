// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rendered shift list.
//!
//! A `ShiftDocument` is a tree of sections holding one fragment per
//! displayed shift. Every node carries a stable `NodeId`. Rendering
//! rebuilds the tree with fresh ids; projection (see `projector`) only
//! rewrites the fields of existing fragments. View state that lives
//! outside the fragments (scroll position, focus, the open modal) is owned
//! by the document and survives both.

use crate::cache::CapacityCache;
use crate::projector::paint;
use crate::workflow::{ReservationAction, WorkflowTable};
use serde::{Deserialize, Serialize};
use shiftboard_domain::{
    AvailabilityBand, BadgeTone, MissionId, ReservedBadge, ShiftId, ShiftListing, ShiftSnapshot,
};
use std::collections::HashMap;
use time::Time;

/// Heading of the pinned section listing the viewer's own shifts.
pub const YOUR_SHIFTS_HEADING: &str = "Your shifts";

/// Stable identity of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

/// Which shifts the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftFilter {
    /// Every visible shift.
    #[default]
    All,
    /// Shifts with a free seat, plus those the viewer already holds.
    OpenOnly,
    /// Only shifts the viewer is registered for.
    Registered,
}

/// Which tab of the board is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardTab {
    /// Every mission, with the viewer's shifts pinned on top.
    #[default]
    Upcoming,
    /// Only the viewer's shifts.
    MyShifts,
}

/// UI state that shapes rendering.
///
/// Created on mount, discarded on unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewContext {
    pub filter: ShiftFilter,
    pub tab: BoardTab,
}

impl ViewContext {
    /// Returns true if a shift passes the active tab and filter.
    #[must_use]
    pub fn admits(&self, snapshot: &ShiftSnapshot, viewer_registered: bool) -> bool {
        if self.tab == BoardTab::MyShifts && !viewer_registered {
            return false;
        }
        match self.filter {
            ShiftFilter::All => true,
            ShiftFilter::OpenOnly => viewer_registered || snapshot.available() > 0,
            ShiftFilter::Registered => viewer_registered,
        }
    }
}

/// The availability badge of a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub band: AvailabilityBand,
    pub tone: BadgeTone,
    pub label: String,
}

impl StatusBadge {
    /// Builds the badge for an availability band.
    #[must_use]
    pub fn for_band(band: AvailabilityBand) -> Self {
        let label: &str = match band {
            AvailabilityBand::Full => "Full",
            AvailabilityBand::Low => "Almost full",
            AvailabilityBand::Normal => "Open",
        };
        Self {
            band,
            tone: band.tone(),
            label: label.to_string(),
        }
    }
}

/// The reserved-pool badge of a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedPoolBadge {
    pub state: ReservedBadge,
    pub visible: bool,
    pub label: String,
}

impl ReservedPoolBadge {
    #[must_use]
    pub fn for_state(state: ReservedBadge) -> Self {
        Self {
            state,
            visible: state.is_visible(),
            label: state.label(),
        }
    }
}

/// The register/unregister button of a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftControl {
    pub action: ReservationAction,
    pub label: String,
    pub enabled: bool,
    /// Locked by an in-flight submission.
    pub busy: bool,
}

/// One displayed shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftFragment {
    pub node_id: NodeId,
    pub shift_id: ShiftId,
    pub mission_id: MissionId,
    pub title: String,
    pub schedule_label: String,
    pub available_label: String,
    pub status_badge: StatusBadge,
    pub reserved_badge: ReservedPoolBadge,
    pub control: ShiftControl,
    pub viewer_registered: bool,
}

/// A headed group of fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub node_id: NodeId,
    pub heading: String,
    /// The mission the section lists, or `None` for the pinned section.
    pub mission_id: Option<MissionId>,
    pub fragments: Vec<ShiftFragment>,
}

/// The rendered board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftDocument {
    sections: Vec<Section>,
    scroll_offset: u32,
    focused: Option<NodeId>,
    open_modal: Option<ShiftId>,
    next_node: u64,
}

impl ShiftDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every section and fragment from the fetched listings.
    ///
    /// Capacity counters are taken from the cache when present, so a
    /// re-render after a filter change shows the latest pushed numbers;
    /// descriptive fields always come from the listing. Scroll
    /// position and the open modal are kept; focus is kept only if the
    /// focused node still exists, which it never does after a re-render
    /// because node ids are never reused.
    pub fn render(
        &mut self,
        listings: &[ShiftListing],
        cache: &CapacityCache,
        context: &ViewContext,
        workflows: &WorkflowTable,
    ) {
        let admitted: Vec<(&ShiftListing, ShiftSnapshot)> = listings
            .iter()
            .map(|listing| {
                let snapshot: ShiftSnapshot = cache.get(listing.snapshot.id).map_or_else(
                    || listing.snapshot.clone(),
                    |cached| listing.snapshot.with_capacity_of(cached),
                );
                (listing, snapshot)
            })
            .filter(|(listing, snapshot)| context.admits(snapshot, listing.is_registered()))
            .collect();

        let mut sections: Vec<Section> = Vec::new();

        if context.tab == BoardTab::Upcoming {
            let mine: Vec<(&ShiftListing, ShiftSnapshot)> = admitted
                .iter()
                .filter(|(listing, _)| listing.is_registered())
                .cloned()
                .collect();
            if !mine.is_empty() {
                let section: Section =
                    self.build_section(String::from(YOUR_SHIFTS_HEADING), None, &mine, workflows);
                sections.push(section);
            }
        }

        let mut order: Vec<MissionId> = Vec::new();
        let mut groups: HashMap<MissionId, Vec<(&ShiftListing, ShiftSnapshot)>> = HashMap::new();
        for entry in admitted {
            let mission_id: MissionId = entry.0.mission.id;
            groups
                .entry(mission_id)
                .or_insert_with(|| {
                    order.push(mission_id);
                    Vec::new()
                })
                .push(entry);
        }

        for mission_id in order {
            let Some(mut group) = groups.remove(&mission_id) else {
                continue;
            };
            group.sort_by_key(|(_, snapshot)| (snapshot.start_time, snapshot.id));
            let heading: String = group
                .first()
                .map(|(listing, _)| {
                    format!("{} ({})", listing.mission.title, listing.mission.date)
                })
                .unwrap_or_default();
            let section: Section =
                self.build_section(heading, Some(mission_id), &group, workflows);
            sections.push(section);
        }

        self.sections = sections;
        if self
            .focused
            .is_some_and(|node_id| !self.contains_node(node_id))
        {
            self.focused = None;
        }
    }

    fn build_section(
        &mut self,
        heading: String,
        mission_id: Option<MissionId>,
        entries: &[(&ShiftListing, ShiftSnapshot)],
        workflows: &WorkflowTable,
    ) -> Section {
        let node_id: NodeId = self.allocate();
        let fragments: Vec<ShiftFragment> = entries
            .iter()
            .map(|(listing, snapshot)| self.build_fragment(listing, snapshot, workflows))
            .collect();
        Section {
            node_id,
            heading,
            mission_id,
            fragments,
        }
    }

    fn build_fragment(
        &mut self,
        listing: &ShiftListing,
        snapshot: &ShiftSnapshot,
        workflows: &WorkflowTable,
    ) -> ShiftFragment {
        let viewer_registered: bool = listing.is_registered();
        let action: ReservationAction = ReservationAction::for_viewer(viewer_registered);
        let mut fragment: ShiftFragment = ShiftFragment {
            node_id: self.allocate(),
            shift_id: snapshot.id,
            mission_id: listing.mission.id,
            title: listing.mission.title.clone(),
            schedule_label: schedule_label(snapshot.start_time, snapshot.end_time),
            available_label: String::new(),
            status_badge: StatusBadge::for_band(AvailabilityBand::Full),
            reserved_badge: ReservedPoolBadge::for_state(ReservedBadge::Hidden),
            control: ShiftControl {
                action,
                label: String::new(),
                enabled: false,
                busy: false,
            },
            viewer_registered,
        };
        paint(&mut fragment, snapshot, workflows.is_locked(snapshot.id));
        fragment
    }

    const fn allocate(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates over every fragment in document order.
    pub fn fragments(&self) -> impl Iterator<Item = &ShiftFragment> {
        self.sections.iter().flat_map(|section| section.fragments.iter())
    }

    /// Iterates over every fragment tagged with `shift_id`.
    pub fn fragments_for(&self, shift_id: ShiftId) -> impl Iterator<Item = &ShiftFragment> {
        self.fragments()
            .filter(move |fragment| fragment.shift_id == shift_id)
    }

    /// Iterates mutably over every fragment tagged with `shift_id`.
    ///
    /// Only fragment fields are reachable; sections cannot be replaced
    /// through this handle.
    pub fn fragments_for_mut(
        &mut self,
        shift_id: ShiftId,
    ) -> impl Iterator<Item = &mut ShiftFragment> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.fragments.iter_mut())
            .filter(move |fragment| fragment.shift_id == shift_id)
    }

    /// Returns the first fragment tagged with `shift_id`.
    #[must_use]
    pub fn fragment(&self, shift_id: ShiftId) -> Option<&ShiftFragment> {
        self.fragments_for(shift_id).next()
    }

    /// Returns true if any fragment is tagged with `shift_id`.
    #[must_use]
    pub fn contains_shift(&self, shift_id: ShiftId) -> bool {
        self.fragment(shift_id).is_some()
    }

    #[must_use]
    pub fn fragment_count(&self) -> usize {
        self.sections.iter().map(|section| section.fragments.len()).sum()
    }

    /// Returns true if a section or fragment carries `node_id`.
    #[must_use]
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.sections.iter().any(|section| {
            section.node_id == node_id
                || section
                    .fragments
                    .iter()
                    .any(|fragment| fragment.node_id == node_id)
        })
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> u32 {
        self.scroll_offset
    }

    pub const fn set_scroll_offset(&mut self, offset: u32) {
        self.scroll_offset = offset;
    }

    #[must_use]
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Moves focus to a node. Unknown nodes are ignored.
    pub fn focus(&mut self, node_id: NodeId) {
        if self.contains_node(node_id) {
            self.focused = Some(node_id);
        }
    }

    #[must_use]
    pub const fn open_modal(&self) -> Option<ShiftId> {
        self.open_modal
    }

    /// Records that the confirmation surface for a shift is showing.
    pub const fn set_open_modal(&mut self, shift_id: Option<ShiftId>) {
        self.open_modal = shift_id;
    }

    /// Drops every node and all view state.
    ///
    /// The node id counter keeps running, so ids handed out before the
    /// clear are never issued again.
    pub fn clear(&mut self) {
        self.sections.clear();
        self.scroll_offset = 0;
        self.focused = None;
        self.open_modal = None;
    }
}

fn schedule_label(start: Option<Time>, end: Option<Time>) -> String {
    match (start, end) {
        (Some(start), Some(end)) => format!(
            "{:02}:{:02} - {:02}:{:02}",
            start.hour(),
            start.minute(),
            end.hour(),
            end.minute()
        ),
        (Some(start), None) => format!("from {:02}:{:02}", start.hour(), start.minute()),
        _ => String::new(),
    }
}
