// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visibility and ordering of the volunteer-facing shift list.

use super::{
    NOW, create_test_persistence, create_test_shift, create_test_volunteer, new_mission,
};
use crate::{NewMission, NewShift, SqlitePersistence};
use shiftboard_domain::{Mission, ShiftListing};
use time::macros::{date, datetime, time};

#[test]
fn test_hidden_and_unpublished_missions_are_not_listed() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let shown: Mission = persistence
        .create_mission(&new_mission("Shown", date!(2026 - 11 - 01)))
        .unwrap();
    let hidden: Mission = persistence
        .create_mission(&NewMission {
            visible: false,
            ..new_mission("Hidden", date!(2026 - 11 - 01))
        })
        .unwrap();
    let scheduled: Mission = persistence
        .create_mission(&NewMission {
            publish_at: Some(datetime!(2026-10-20 08:00 UTC)),
            ..new_mission("Scheduled", date!(2026 - 11 - 01))
        })
        .unwrap();
    let published: Mission = persistence
        .create_mission(&NewMission {
            publish_at: Some(datetime!(2026-10-01 08:00 UTC)),
            ..new_mission("Published", date!(2026 - 11 - 01))
        })
        .unwrap();
    for mission in [&shown, &hidden, &scheduled, &published] {
        create_test_shift(&mut persistence, mission, 4, 0);
    }

    let titles: Vec<String> = persistence
        .list_visible_shifts(1, NOW)
        .unwrap()
        .into_iter()
        .map(|listing| listing.mission.title)
        .collect();

    assert_eq!(titles, vec![String::from("Shown"), String::from("Published")]);
}

#[test]
fn test_listing_orders_by_mission_date_then_start_time() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let later: Mission = persistence
        .create_mission(&new_mission("Later", date!(2026 - 12 - 01)))
        .unwrap();
    let sooner: Mission = persistence
        .create_mission(&new_mission("Sooner", date!(2026 - 11 - 01)))
        .unwrap();
    for (mission, start) in [
        (&later, time!(08:00)),
        (&sooner, time!(14:00)),
        (&sooner, time!(07:30)),
    ] {
        persistence
            .create_shift(&NewShift {
                mission_id: mission.id,
                start_time: start,
                end_time: time!(18:00),
                max_slots: 3,
                reserved_slots: 0,
                hours_value: 2.0,
            })
            .unwrap();
    }

    let order: Vec<(String, Option<time::Time>)> = persistence
        .list_visible_shifts(1, NOW)
        .unwrap()
        .into_iter()
        .map(|listing| (listing.mission.title, listing.snapshot.start_time))
        .collect();

    assert_eq!(
        order,
        vec![
            (String::from("Sooner"), Some(time!(07:30))),
            (String::from("Sooner"), Some(time!(14:00))),
            (String::from("Later"), Some(time!(08:00))),
        ]
    );
}

#[test]
fn test_listing_carries_only_the_viewers_registration() {
    let mut persistence: SqlitePersistence = create_test_persistence();
    let mission: Mission = persistence
        .create_mission(&new_mission("Drive", date!(2026 - 11 - 01)))
        .unwrap();
    let shift = create_test_shift(&mut persistence, &mission, 4, 0);
    let viewer = create_test_volunteer(&mut persistence, false);
    let other = create_test_volunteer(&mut persistence, false);

    persistence
        .register(shift.id.value(), other.volunteer_id, None)
        .unwrap();

    let listings: Vec<ShiftListing> = persistence
        .list_visible_shifts(viewer.volunteer_id, NOW)
        .unwrap();
    assert!(!listings[0].is_registered());
    assert_eq!(listings[0].snapshot.total_registrations, 1);

    persistence
        .register(shift.id.value(), viewer.volunteer_id, Some("bringing a van"))
        .unwrap();

    let listings: Vec<ShiftListing> = persistence
        .list_visible_shifts(viewer.volunteer_id, NOW)
        .unwrap();
    let registration = listings[0].registration.as_ref().unwrap();
    assert_eq!(registration.note.as_deref(), Some("bringing a van"));
    assert_eq!(listings[0].snapshot.total_registrations, 2);
}
