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
//! Four balls braced by six springs, dropped into a walled corner
//!
//! A scripted pointer grabs the top-left ball, drags it and lets go, the
//! same way a user would kick it with the mouse. A text renderer prints the
//! scene every 30 ticks.
//!
//! Run with `RUST_LOG=rigid2d=debug` to see the kick transitions.

use rigid2d::{
    BodyView, DVec2, DragVector, Outline, PhysicsError, PointerSnapshot, SceneRenderer, World,
};

/// Prints one line per body
struct TextRenderer;

impl SceneRenderer for TextRenderer {
    fn draw_body(&mut self, body: &BodyView<'_>) {
        match body.outline {
            Outline::Circle { radius, .. } => println!(
                "  {} {:?} r={:.0} at ({:7.2}, {:7.2})",
                body.handle, body.kind, radius, body.location.x, body.location.y
            ),
            Outline::Polygon(corners) => println!(
                "  {} {:?} {} corners at ({:7.2}, {:7.2})",
                body.handle,
                body.kind,
                corners.len(),
                body.location.x,
                body.location.y
            ),
        }
    }

    fn draw_drag(&mut self, drag: &DragVector) {
        println!(
            "  drag arrow ({:.1}, {:.1}) -> ({:.1}, {:.1})",
            drag.base.x, drag.base.y, drag.target.x, drag.target.y
        );
    }
}

/// Pointer script: grab at tick 20, drag until 40, release
fn pointer_at(tick: u64) -> PointerSnapshot {
    match tick {
        20..=39 => {
            let t = (tick - 20) as f64;
            PointerSnapshot::down(50.0 + t, 50.0 - t)
        }
        40 => PointerSnapshot::up(90.0, 20.0),
        _ => PointerSnapshot::default(),
    }
}

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    println!("rigid2d - Spring Square Example");
    println!("===============================\n");

    let mut world = World::new();

    let corners = [(50.0, 50.0), (150.0, 50.0), (50.0, 100.0), (150.0, 100.0)];
    let balls: Vec<_> = corners
        .iter()
        .map(|&(x, y)| world.create_ball(x, y, 3.0))
        .collect();

    for (a, b) in [(0, 1), (1, 3), (0, 2), (2, 3), (0, 3), (1, 2)] {
        world.create_spring(0.1, 0.5, balls[a], balls[b])?;
    }

    world.create_wall(5.0, 470.0, 780.0, 30.0);
    world.create_wall(760.0, 5.0, 30.0, 470.0);

    println!(
        "{} bodies, {} springs\n",
        world.body_count(),
        world.springs().len()
    );

    let mut renderer = TextRenderer;
    for tick in 0..300 {
        world.step_with_input(&pointer_at(tick));

        if tick % 30 == 0 {
            println!("tick {tick}:");
            world.render(&mut renderer);
        }
    }

    let centroid = balls
        .iter()
        .filter_map(|&h| world.body(h))
        .map(|b| b.location())
        .sum::<DVec2>()
        / balls.len() as f64;
    println!(
        "\nAfter {} ticks the square's centroid rests at ({:.2}, {:.2})",
        world.tick_count(),
        centroid.x,
        centroid.y
    );

    Ok(())
}
