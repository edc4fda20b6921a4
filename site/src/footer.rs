//! The site footer, rendered after the page content.

use sitekit_core::AttrMask;

use crate::colors::{self, FOOTER};
use crate::content::{Align, Flow, Span};

const BLURB: &str = "Professional software development services delivering high-quality mobile \
                     apps, web applications, and custom solutions for businesses. Building \
                     accessible, scalable software that makes a difference.";

const QUICK_LINKS: [(&str, &str); 4] = [
    ("Home", "/"),
    ("Services", "/services"),
    ("Portfolio", "/portfolio"),
    ("About", "/about"),
];

/// The copyright line. The year is left out until it is known.
pub fn copyright(year: Option<i32>) -> String {
    match year {
        Some(year) => format!("© {year} DeanWaringDev. All rights reserved."),
        None => "© DeanWaringDev. All rights reserved.".to_string(),
    }
}

pub fn footer(width: i32, year: Option<i32>) -> Flow {
    let heading = FOOTER.with_fg(colors::WHITE).add_attrs(AttrMask::BOLD);
    let mut flow = Flow::new(width);

    flow.blank(FOOTER);
    flow.line(
        vec![
            Span::text("DeanWaring", heading),
            Span::text("Dev", heading.with_fg(colors::ACCENT)),
        ],
        Align::Left,
        FOOTER,
    );
    flow.paragraph(BLURB, FOOTER, Align::Left, FOOTER);
    flow.line(
        vec![
            Span::link("GitHub", "https://github.com/DeanWaringDev", FOOTER)
                .labelled("Visit DeanWaringDev on GitHub (opens in new tab)"),
            Span::text("   ", FOOTER),
            Span::link("LinkedIn", "https://linkedin.com/in/deanwaring", FOOTER)
                .labelled("Connect with DeanWaringDev on LinkedIn (opens in new tab)"),
        ],
        Align::Left,
        FOOTER,
    );

    flow.blank(FOOTER);
    flow.line(vec![Span::text("Quick Links", heading)], Align::Left, FOOTER);
    for (label, href) in QUICK_LINKS {
        flow.line(vec![Span::link(label, href, FOOTER)], Align::Left, FOOTER);
    }

    flow.blank(FOOTER);
    flow.line(vec![Span::text("Get in Touch", heading)], Align::Left, FOOTER);
    flow.line(
        vec![Span::link("Contact Us", "/contact", FOOTER)],
        Align::Left,
        FOOTER,
    );
    flow.line(
        vec![Span::link(
            "hello@deanwaringdev.com",
            "mailto:hello@deanwaringdev.com",
            FOOTER,
        )],
        Align::Left,
        FOOTER,
    );

    flow.blank(FOOTER);
    let rule = "─".repeat((width - 4).max(0) as usize);
    flow.line(
        vec![Span::text(rule, FOOTER.with_fg(colors::SLATE))],
        Align::Center,
        FOOTER,
    );
    flow.line(
        vec![Span::text(copyright(year), FOOTER)],
        Align::Center,
        FOOTER,
    );
    flow.blank(FOOTER);
    flow
}
