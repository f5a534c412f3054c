// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Boxes and balls dropped onto a floor
//!
//! Demonstrates:
//! - Building a world from a custom configuration
//! - Gravity, drag and friction acting together
//! - Reading per-tick collision statistics

use rigid2d::integration::total_kinetic_energy;
use rigid2d::{StepStats, World, WorldConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("rigid2d - Box Drop Example");
    println!("==========================\n");

    let config = WorldConfig::builder().speed_limits(8.0, 0.05).build()?;
    let mut world = World::with_config(config)?;

    world.create_wall(0.0, 400.0, 600.0, 20.0);
    world.create_wall(0.0, 0.0, 20.0, 400.0);
    world.create_wall(580.0, 0.0, 20.0, 400.0);

    for row in 0..3 {
        for column in 0..6 {
            let x = 60.0 + column as f64 * 80.0 + row as f64 * 10.0;
            let y = 60.0 + row as f64 * 60.0;
            if (row + column) % 2 == 0 {
                world.create_box(x, y, 24.0, 18.0);
            } else {
                world.create_ball(x + 12.0, y + 9.0, 10.0);
            }
        }
    }

    println!(
        "Created {} dynamic and {} static bodies\n",
        world.dynamic_bodies().count(),
        world.static_bodies().count()
    );

    let mut totals = StepStats::default();
    for tick in 1..=600 {
        world.step();

        let stats = world.last_step_stats();
        totals.shadow_tests += stats.shadow_tests;
        totals.narrow_phase_calls += stats.narrow_phase_calls;
        totals.contacts += stats.contacts;
        totals.impulses += stats.impulses;

        if tick % 100 == 0 {
            println!(
                "tick {:3}: {:3} contacts, kinetic energy {:10.3}",
                tick,
                stats.contacts,
                total_kinetic_energy(world.bodies())
            );
        }
    }

    println!("\nTotals over {} ticks:", world.tick_count());
    println!("  shadow tests:       {}", totals.shadow_tests);
    println!("  narrow-phase calls: {}", totals.narrow_phase_calls);
    println!("  contacts:           {}", totals.contacts);
    println!("  impulses:           {}", totals.impulses);

    let lowest = world
        .dynamic_bodies()
        .filter_map(|h| world.body(h))
        .map(|b| b.location().y)
        .fold(f64::NEG_INFINITY, f64::max);
    println!("\nLowest body centroid: y = {lowest:.2}");

    Ok(())
}
