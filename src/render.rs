//! Turns an evaluated frame into an SVG document string.
//!
//! Pure string generation, no I/O. Ring rotation is applied per group;
//! labels counter-rotate around their own anchor so text stays upright.

use std::fmt::Write as _;

use crate::engine::{HubLayer, RenderFrame, RingLayer};
use crate::geometry::{describe_arc, describe_ring_arc, polar_to_cartesian};

const FILL_OPEN: &str = "#555";
const FILL_DONE: &str = "#006400";
const FILL_HUB: &str = "#444";
const STROKE: &str = "#000";

/// Radii below this inner value are drawn as full-disk pie sectors.
const DISK_EPS: f64 = 1e-9;

pub fn render_svg(frame: &RenderFrame, size: f64) -> String {
    let half = size / 2.0;
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {size} {size}\" \
         width=\"{size}\" height=\"{size}\">",
        -half, -half
    );

    if frame.empty {
        out.push_str(
            "<text x=\"0\" y=\"0\" text-anchor=\"middle\" dominant-baseline=\"middle\">\
             No tasks yet</text>",
        );
        out.push_str("</svg>");
        return out;
    }

    push_hub(&mut out, &frame.hub);
    if let Some(hub) = &frame.outgoing_hub {
        push_hub(&mut out, hub);
    }
    if let Some(ring) = &frame.outgoing_ring {
        push_ring(&mut out, ring, false);
    }
    push_ring(&mut out, &frame.current, true);
    if let Some(ring) = &frame.child {
        push_ring(&mut out, ring, true);
    }
    if let Some(ring) = &frame.outgoing_child {
        push_ring(&mut out, ring, false);
    }

    out.push_str("</svg>");
    out
}

fn push_hub(out: &mut String, hub: &HubLayer) {
    if hub.radius <= 0.0 {
        return;
    }
    let _ = write!(
        out,
        "<g opacity=\"{}\"><circle cx=\"0\" cy=\"0\" r=\"{}\" fill=\"{FILL_HUB}\" \
         stroke=\"{STROKE}\"/>",
        hub.opacity, hub.radius
    );
    if !hub.name.is_empty() {
        let _ = write!(
            out,
            "<text x=\"0\" y=\"0\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            escape_text(&hub.name)
        );
    }
    out.push_str("</g>");
}

fn push_ring(out: &mut String, ring: &RingLayer, with_labels: bool) {
    let _ = write!(
        out,
        "<g transform=\"rotate({})\" opacity=\"{}\">",
        ring.rotation_deg, ring.opacity
    );
    for (task, angle) in ring.tasks.iter().zip(&ring.angles) {
        let d = if ring.radii.inner <= DISK_EPS {
            describe_arc(0.0, 0.0, ring.radii.outer, angle.start, angle.end)
        } else {
            describe_ring_arc(
                0.0,
                0.0,
                ring.radii.inner,
                ring.radii.outer,
                angle.start,
                angle.end,
            )
        };
        let fill = if task.completed { FILL_DONE } else { FILL_OPEN };
        let _ = write!(out, "<path d=\"{d}\" fill=\"{fill}\" stroke=\"{STROKE}\"/>");

        if with_labels {
            let pos = polar_to_cartesian(0.0, 0.0, ring.radii.midline(), angle.mid);
            let _ = write!(
                out,
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" \
                 transform=\"rotate({r} {x} {y})\">{name}</text>",
                x = pos.x,
                y = pos.y,
                r = -ring.rotation_deg,
                name = escape_text(&task.name)
            );
        }
    }
    out.push_str("</g>");
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
