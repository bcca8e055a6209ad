// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover a popover trigger, travel to the content, then wander off.
//!
//! A scripted pointer path is replayed against a trigger and its content
//! with a virtual clock. Each step prints its outcome and the popover phase.
//!
//! Run:
//! - `cargo run -p understory_demos --example popover_hover`
//! - `RUST_LOG=understory_popover=trace cargo run -p understory_demos --example popover_hover`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_demos::{Step, replay};
use understory_popover::timer::ManualScheduler;
use understory_popover::trigger::TriggerConfig;
use understory_popover::{Phase, Popover, PopoverConfig};

const TRIGGER: Rect = Rect::new(40.0, 40.0, 140.0, 72.0);
const CONTENT: Rect = Rect::new(180.0, 90.0, 420.0, 300.0);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PopoverConfig {
        trigger: TriggerConfig {
            open_on_hover: true,
            open_delay: 200,
            ..TriggerConfig::default()
        },
        close_delay: 300,
        ..PopoverConfig::default()
    };
    let mut p = Popover::with_observer(ManualScheduler::new(), Vec::new(), config);

    let script = [
        Step::Move(10.0, 10.0),
        Step::Move(60.0, 50.0),
        Step::Wait(250),
        Step::Move(100.0, 60.0),
        // Diagonal travel through the gap toward the content.
        Step::Move(160.0, 80.0),
        Step::Move(200.0, 120.0),
        Step::Wait(1_000),
        // Leave the content away from the trigger.
        Step::Move(300.0, 320.0),
        Step::Move(300.0, 600.0),
        Step::Wait(300),
        // Hover again and pin with a click.
        Step::Move(60.0, 50.0),
        Step::Wait(200),
        Step::Click,
        Step::Move(700.0, 700.0),
        Step::Wait(1_000),
    ];

    replay(&mut p, TRIGGER, CONTENT, &script, |p, step, outcome| {
        println!("{step:<20?} {outcome:?} -> {:?}", p.state.phase());
    });

    println!("== Open changes ==");
    for change in p.state.observer() {
        println!("  {change:?}");
    }
    assert_eq!(p.state.phase(), Phase::OpenExplicit);
}
