//! The pages of the main region.

use sitekit_core::AttrMask;

use crate::colors::{self, CARD, CTA_BUTTON, HERO, PAGE, PAGE_LINK};
use crate::content::{Align, Flow, Span};

struct Card {
    title: &'static str,
    blurb: &'static str,
    tags: &'static [&'static str],
    link: &'static str,
    href: &'static str,
}

const SERVICES: [Card; 3] = [
    Card {
        title: "Mobile App Development",
        blurb: "Native and cross-platform mobile applications for iOS and Android. \
                From concept to app store deployment.",
        tags: &[],
        link: "Learn More →",
        href: "/services#mobile",
    },
    Card {
        title: "Web Applications",
        blurb: "Modern, responsive web applications built with cutting-edge technologies. \
                Fast, secure, and scalable solutions.",
        tags: &[],
        link: "Learn More →",
        href: "/services#web",
    },
    Card {
        title: "Custom Solutions",
        blurb: "Tailored software solutions designed specifically for your unique business \
                requirements and workflows.",
        tags: &[],
        link: "Learn More →",
        href: "/services#custom",
    },
];

const PROJECTS: [Card; 3] = [
    Card {
        title: "GCSEFastTrack",
        blurb: "Comprehensive English language learning platform with subscription-based \
                access, interactive lessons, and progress tracking.",
        tags: &["Education", "Web App"],
        link: "View Case Study →",
        href: "/portfolio#gcse",
    },
    Card {
        title: "Childminding Management",
        blurb: "Complete childminding management system with parent portals, attendance \
                tracking, finance management, and automated reporting.",
        tags: &["SaaS", "Mobile App"],
        link: "View Case Study →",
        href: "/portfolio#childminding",
    },
    Card {
        title: "WheelchairRacer",
        blurb: "UK running events platform with race analysis, training plans, and \
                comprehensive event discovery for wheelchair athletes.",
        tags: &["Sports", "Web Platform"],
        link: "View Case Study →",
        href: "/portfolio#wheelchairracer",
    },
];

const REASONS: [(&str, &str); 4] = [
    (
        "Quality Focused",
        "Clean, maintainable code following industry best practices",
    ),
    (
        "Fast Delivery",
        "Efficient development process with regular updates",
    ),
    ("Scalable Solutions", "Built to grow with your business needs"),
    (
        "Ongoing Support",
        "Continued maintenance and feature development",
    ),
];

pub fn home(width: i32) -> Flow {
    let mut flow = Flow::new(width);
    hero(&mut flow);

    flow.section_title(
        "Our Services",
        "Comprehensive software development solutions tailored to your business needs",
    );
    for card in &SERVICES {
        card_block(&mut flow, card);
    }

    flow.section_title(
        "Featured Projects",
        "Building real products that solve real problems",
    );
    for card in &PROJECTS {
        card_block(&mut flow, card);
    }
    flow.line(
        vec![Span::link("[ View All Projects ]", "/portfolio", HERO.add_attrs(AttrMask::BOLD))],
        Align::Center,
        PAGE,
    );

    flow.section_title(
        "Why Work With Us",
        "Professional software development backed by real-world experience",
    );
    for (title, text) in REASONS {
        flow.line(
            vec![Span::text(title, colors::PAGE_HEADING)],
            Align::Center,
            PAGE,
        );
        flow.paragraph(text, colors::PAGE_TEXT, Align::Center, PAGE);
        flow.blank(PAGE);
    }

    closing(&mut flow);
    flow
}

/// Shown for any route without a page of its own.
pub fn not_found(path: &str, width: i32) -> Flow {
    let mut flow = Flow::new(width);
    flow.blank(PAGE);
    flow.line(
        vec![Span::text("Page not found", colors::PAGE_HEADING)],
        Align::Center,
        PAGE,
    );
    flow.blank(PAGE);
    flow.paragraph(
        &format!("There is nothing at {path} yet."),
        colors::PAGE_TEXT,
        Align::Center,
        PAGE,
    );
    flow.blank(PAGE);
    flow.line(
        vec![Span::link("← Back to Home", "/", PAGE_LINK)],
        Align::Center,
        PAGE,
    );
    flow.blank(PAGE);
    flow
}

fn hero(flow: &mut Flow) {
    let title = HERO.add_attrs(AttrMask::BOLD);
    flow.blank(HERO);
    flow.paragraph("Professional Software Development", title, Align::Center, HERO);
    flow.paragraph(
        "That Drives Results",
        title.with_fg(colors::ACCENT),
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
    flow.paragraph(
        "Transform your business vision into powerful, scalable software solutions. \
         We specialize in mobile apps, web applications, and custom development.",
        HERO.with_fg(colors::CREAM),
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
    flow.line(
        vec![
            Span::link("[ Start Your Project ]", "/contact", CTA_BUTTON),
            Span::text("  ", HERO),
            Span::link("[ View Our Work ]", "/portfolio", title),
        ],
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
}

fn card_block(flow: &mut Flow, card: &Card) {
    flow.blank(CARD);
    flow.line(
        vec![Span::text(card.title, CARD.add_attrs(AttrMask::BOLD))],
        Align::Left,
        CARD,
    );
    flow.paragraph(card.blurb, CARD.with_fg(colors::SLATE), Align::Left, CARD);
    if !card.tags.is_empty() {
        let mut spans = Vec::new();
        for tag in card.tags {
            spans.push(Span::text(format!("({tag})"), CARD.with_bg(colors::WHITE)));
            spans.push(Span::text(" ", CARD));
        }
        flow.line(spans, Align::Left, CARD);
    }
    flow.line(
        vec![Span::link(card.link, card.href, CARD.with_fg(colors::ACCENT).add_attrs(AttrMask::BOLD))],
        Align::Left,
        CARD,
    );
    flow.blank(CARD);
    flow.blank(PAGE);
}

fn closing(flow: &mut Flow) {
    flow.blank(HERO);
    flow.line(
        vec![Span::text("Ready to Start Your Project?", HERO.add_attrs(AttrMask::BOLD))],
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
    flow.paragraph(
        "Let's discuss how we can help transform your ideas into powerful software solutions.",
        HERO.with_fg(colors::CREAM),
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
    flow.line(
        vec![Span::link("[ Get in Touch ]", "/contact", CTA_BUTTON)],
        Align::Center,
        HERO,
    );
    flow.blank(HERO);
}
