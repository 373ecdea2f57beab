//! Scene draw-list builder
//!
//! Flattens a read-only snapshot of the scene into painter-ordered draw
//! commands: backdrop, castle, actors, balloons, confetti. Pure; the only
//! inputs are the state and the sway toggle from settings.

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::BALLOON_WOBBLE_AMPLITUDE;
use crate::palette::Color;
use crate::sim::state::{Actor, ActorKind, Balloon, Particle, SceneBounds, SceneState};

use super::draw::DrawCmd;

const SKY: Color = Color::rgb(0xa9, 0xd6, 0xf5);
const GRASS: Color = Color::rgb(0x6f, 0xae, 0x5a);
const STONE: Color = Color::rgb(0xb9, 0xb2, 0xa6);
const STONE_DARK: Color = Color::rgb(0x8f, 0x88, 0x7c);
const ROOF: Color = Color::rgb(0xc2, 0x4b, 0x3f);
const PENNANT: Color = Color::rgb(0xe8, 0xc5, 0x4a);
const GATE: Color = Color::rgb(0x5a, 0x43, 0x2e);
const COAT: Color = Color::rgb(0x46, 0x5a, 0x8c);
const SKIN: Color = Color::rgb(0xe8, 0xc2, 0x9a);
const STEEL: Color = Color::rgb(0x9a, 0xa2, 0xaa);
const HORSE_COAT: Color = Color::rgb(0x7a, 0x52, 0x33);
const STRING: Color = Color::rgb(0x55, 0x55, 0x55);
const HIGHLIGHT: Color = Color::rgb(0xff, 0xff, 0xff);

/// Build the draw list for one frame
///
/// `sway` disables the balloon wobble offset (reduced-motion preference);
/// the simulation state is untouched either way.
pub fn build_scene(state: &SceneState, sway: bool) -> Vec<DrawCmd> {
    let mut cmds =
        Vec::with_capacity(64 + state.balloons.len() * 5 + state.particles.len());

    backdrop(&mut cmds, state.bounds, state.elapsed);

    for actor in &state.actors {
        match actor.kind {
            ActorKind::Guard => guard(&mut cmds, actor),
            ActorKind::Horse => horse(&mut cmds, actor),
        }
    }

    for b in &state.balloons {
        balloon(&mut cmds, b, sway);
    }

    for p in &state.particles {
        confetti(&mut cmds, p);
    }

    cmds
}

/// Sky, grass, wall, towers, gate. Only the pennants animate (`elapsed`).
fn backdrop(cmds: &mut Vec<DrawCmd>, bounds: SceneBounds, elapsed: f32) {
    let w = bounds.width;
    let h = bounds.height;
    let (wall_x0, wall_x1) = bounds.wall_span();
    let wall_top = bounds.rampart_y() + 4.0;
    let wall_base = h * 0.62;

    cmds.push(rect(0.0, 0.0, w, h, SKY));
    cmds.push(rect(0.0, h * 0.58, w, h * 0.42, GRASS));

    // Curtain wall with merlons along the top
    cmds.push(rect(wall_x0, wall_top, wall_x1 - wall_x0, wall_base - wall_top, STONE));
    let merlon_w = 10.0;
    let mut x = wall_x0;
    while x + merlon_w <= wall_x1 {
        cmds.push(rect(x, wall_top - 8.0, merlon_w, 8.0, STONE));
        x += merlon_w * 2.0;
    }

    // Corner towers with roofs and waving pennants
    for (i, tower_x) in [wall_x0, wall_x1].into_iter().enumerate() {
        let tw = w * 0.075;
        let tower_top = h * 0.36;
        cmds.push(rect(tower_x - tw / 2.0, tower_top, tw, wall_base - tower_top, STONE_DARK));
        cmds.push(DrawCmd::Triangle {
            a: Vec2::new(tower_x - tw * 0.7, tower_top),
            b: Vec2::new(tower_x + tw * 0.7, tower_top),
            c: Vec2::new(tower_x, tower_top - tw),
            color: ROOF,
            alpha: 1.0,
        });
        let pole_top = Vec2::new(tower_x, tower_top - tw - 16.0);
        cmds.push(line(Vec2::new(tower_x, tower_top - tw), pole_top, 2.0, STONE_DARK));
        let flutter = (elapsed * 2.2 + i as f32 * PI).sin() * 3.0;
        cmds.push(DrawCmd::Triangle {
            a: pole_top,
            b: pole_top + Vec2::new(0.0, 7.0),
            c: pole_top + Vec2::new(14.0, 3.5 + flutter),
            color: PENNANT,
            alpha: 1.0,
        });
    }

    // Gatehouse arch
    let gate_w = w * 0.12;
    let gate_x = w / 2.0 - gate_w / 2.0;
    let gate_top = wall_base - h * 0.09;
    cmds.push(rect(gate_x, gate_top, gate_w, wall_base - gate_top, GATE));
    cmds.push(DrawCmd::Circle {
        center: Vec2::new(w / 2.0, gate_top),
        radius: gate_w / 2.0,
        color: GATE,
        alpha: 1.0,
    });
}

/// A guard posed by its animation phase, feet on the walkway line
fn guard(cmds: &mut Vec<DrawCmd>, actor: &Actor) {
    let feet = actor.pos;
    let swing = actor.phase.sin() * 4.0;
    let hip = feet - Vec2::new(0.0, 12.0);

    cmds.push(line(hip, feet + Vec2::new(swing, 0.0), 2.5, COAT));
    cmds.push(line(hip, feet + Vec2::new(-swing, 0.0), 2.5, COAT));
    cmds.push(rect(feet.x - 3.5, feet.y - 26.0, 7.0, 14.0, COAT));
    cmds.push(DrawCmd::Circle {
        center: feet - Vec2::new(0.0, 30.0),
        radius: 4.0,
        color: SKIN,
        alpha: 1.0,
    });
    // Spear carried on the facing side
    let spear_x = feet.x + actor.dir * 6.0;
    cmds.push(line(
        Vec2::new(spear_x, feet.y),
        Vec2::new(spear_x, feet.y - 38.0),
        1.5,
        STEEL,
    ));
}

/// A trotting horse, feet on the courtyard line
fn horse(cmds: &mut Vec<DrawCmd>, actor: &Actor) {
    let feet = actor.pos;
    let body = feet - Vec2::new(0.0, 14.0);

    // Legs first so the body overlaps their tops
    for i in 0..4 {
        let leg_x = feet.x - 12.0 + 8.0 * i as f32;
        let swing = (actor.phase + i as f32 * (PI / 2.0)).sin() * 3.5;
        cmds.push(line(
            Vec2::new(leg_x, feet.y - 10.0),
            Vec2::new(leg_x + swing, feet.y),
            2.5,
            HORSE_COAT,
        ));
    }
    cmds.push(DrawCmd::Ellipse {
        center: body,
        rx: 17.0,
        ry: 8.5,
        color: HORSE_COAT,
        alpha: 1.0,
    });
    // Neck and head on the facing side, tail trailing behind
    let neck_base = body + Vec2::new(actor.dir * 13.0, -3.0);
    let head = body + Vec2::new(actor.dir * 20.0, -12.0);
    cmds.push(line(neck_base, head, 4.0, HORSE_COAT));
    cmds.push(DrawCmd::Ellipse {
        center: head + Vec2::new(actor.dir * 3.0, -1.0),
        rx: 5.5,
        ry: 3.5,
        color: HORSE_COAT,
        alpha: 1.0,
    });
    let tail_base = body - Vec2::new(actor.dir * 16.0, 3.0);
    let tail_swing = actor.phase.cos() * 2.5;
    cmds.push(line(
        tail_base,
        tail_base + Vec2::new(-actor.dir * 6.0 + tail_swing, 9.0),
        2.0,
        HORSE_COAT,
    ));
}

/// A balloon with string; sway is a render-only horizontal offset
fn balloon(cmds: &mut Vec<DrawCmd>, b: &Balloon, sway: bool) {
    if b.popped {
        return;
    }
    let sway_x = if sway {
        b.wobble_phase.sin() * BALLOON_WOBBLE_AMPLITUDE
    } else {
        0.0
    };
    let center = b.pos + Vec2::new(sway_x, 0.0);
    let ry = b.radius * 1.15;

    cmds.push(line(
        center + Vec2::new(0.0, ry),
        center + Vec2::new(-sway_x * 0.6, ry + 26.0),
        1.0,
        STRING,
    ));
    cmds.push(DrawCmd::Triangle {
        a: center + Vec2::new(-3.0, ry + 5.0),
        b: center + Vec2::new(3.0, ry + 5.0),
        c: center + Vec2::new(0.0, ry - 1.0),
        color: b.color,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Ellipse {
        center,
        rx: b.radius,
        ry,
        color: b.color,
        alpha: 1.0,
    });
    cmds.push(DrawCmd::Circle {
        center: center + Vec2::new(-b.radius * 0.35, -ry * 0.35),
        radius: b.radius * 0.25,
        color: HIGHLIGHT,
        alpha: 0.35,
    });
}

/// A single confetti fleck; opacity comes straight from age/lifetime
fn confetti(cmds: &mut Vec<DrawCmd>, p: &Particle) {
    cmds.push(DrawCmd::Circle {
        center: p.pos,
        radius: 3.0,
        color: p.color,
        alpha: p.opacity(),
    });
}

fn rect(x: f32, y: f32, w: f32, h: f32, color: Color) -> DrawCmd {
    DrawCmd::Rect {
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color,
        alpha: 1.0,
    }
}

fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> DrawCmd {
    DrawCmd::Line {
        from,
        to,
        width,
        color,
        alpha: 1.0,
    }
}
