use crate::markup::classify::strip_bold_markers;
use crate::model::{Font, ResumeHeader};

use super::LayoutContext;
use super::inline::TextMeasure;
use super::links::{absolute_url, mailto};

const NAME_GAP: f32 = 18.0;
const CONTACT_SPACING: f32 = 14.0;
const DIVIDER_GRAY: u8 = 150;
const DIVIDER_GAP: f32 = 15.0;

/// Name, role and location on the left; contact details right-aligned; a gray
/// divider underneath.
pub(super) fn render(ctx: &mut LayoutContext<'_>, header: &ResumeHeader) {
    let top = ctx.pager.y();
    let left = ctx.left();
    let right = ctx.right();
    let contact = Font::regular(ctx.config.contact_size);

    let mut left_y = top;
    if let Some(name) = &header.name {
        ctx.pager
            .text_at(name, left, left_y, Font::bold(ctx.config.name_size), None);
        left_y += NAME_GAP;
    }
    for value in [&header.role, &header.location].into_iter().flatten() {
        ctx.pager
            .text_at(&strip_bold_markers(value), left, left_y, contact, None);
        left_y += CONTACT_SPACING;
    }

    let mut items: Vec<(String, Option<String>)> = Vec::new();
    if let Some(phone) = &header.phone {
        items.push((phone.clone(), None));
    }
    if let Some(email) = &header.email {
        items.push((email.clone(), Some(mailto(email))));
    }
    for (value, label) in [
        (&header.linkedin, "LinkedIn Profile"),
        (&header.github, "GitHub Profile"),
        (&header.portfolio, "Portfolio Link"),
    ] {
        if let Some(value) = value {
            items.push((label.to_string(), Some(absolute_url(value))));
        }
    }

    let mut right_y = top;
    for (label, url) in items {
        let width = ctx.measure.measure(&label, contact);
        let x = right - width;
        match url {
            Some(url) => {
                ctx.pager
                    .text_at(&label, x, right_y, contact, Some(ctx.config.link_color));
                ctx.pager
                    .link_at(x, right_y, width, ctx.config.body_size, &url);
            }
            None => ctx.pager.text_at(&label, x, right_y, contact, None),
        }
        right_y += CONTACT_SPACING;
    }

    let divider = left_y.max(right_y) - 4.0;
    ctx.pager.advance(divider - top);
    ctx.pager.rule(left, right, DIVIDER_GRAY);
    ctx.pager.advance(DIVIDER_GAP);
    log::debug!("Applicant header placed, divider at y={divider:.1}");
}
