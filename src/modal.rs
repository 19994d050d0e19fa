//! Builds the detail panel for a selected placement.
//!
//! Dispatch is an exhaustive match on [`ComponentType`]; each arm reads
//! its record by the placement's data key. A record that is missing, or
//! of the wrong shape for the kind, renders the "not found" line.

use crate::content::{self, About, Contact, Education, Experience, Goals, Languages, Projects, Section, Skills, Workflow};
use crate::i18n::{text, Language};
use crate::layout::{bullets, card, chips, heading, link, para, subheading, Node};
use crate::placement::{ComponentType, Placement};

/// The whole panel: header with label and close control, then the body.
pub fn present(placement: &Placement, lang: Language) -> Node {
    let header = Node::new("div").class("modal-header").children([
        Node::new("span").class("status-dot"),
        Node::new("span").class("modal-label").text(text(lang, &placement.kind.label_key())),
        Node::new("button")
            .class("modal-close")
            .attr("type", "button")
            .attr("aria-label", text(lang, "close"))
            .attr("data-action", "close")
            .text("\u{d7}"),
    ]);
    Node::new("div")
        .class("modal-panel")
        .attr("role", "dialog")
        .attr("aria-modal", "true")
        .children([header, Node::new("div").class("modal-body").child(body(placement, lang))])
}

/// Section content alone.
pub fn body(placement: &Placement, lang: Language) -> Node {
    let section = content::lookup(placement.data_key);
    let rendered = match placement.kind {
        ComponentType::Mcu => match section {
            Some(Section::About(s)) => Some(about(s, lang)),
            _ => None,
        },
        ComponentType::Vrm => match section {
            Some(Section::Skills(s)) => Some(skills(s, lang)),
            _ => None,
        },
        ComponentType::Osc => match section {
            Some(Section::Education(s)) => Some(education(s, lang)),
            _ => None,
        },
        ComponentType::Com => match section {
            Some(Section::Experience(s)) => Some(experience(s, lang)),
            _ => None,
        },
        ComponentType::Mem => match section {
            Some(Section::Projects(s)) => Some(projects(s, lang)),
            _ => None,
        },
        ComponentType::Cap => match section {
            Some(Section::Workflow(s)) => Some(workflow(s, lang)),
            _ => None,
        },
        ComponentType::Uart => match section {
            Some(Section::Contact(s)) => Some(contact(s, lang)),
            _ => None,
        },
        ComponentType::Led => match section {
            Some(Section::Languages(s)) => Some(languages(s, lang)),
            _ => None,
        },
        ComponentType::Swd => match section {
            Some(Section::Goals(s)) => Some(goals(s, lang)),
            _ => None,
        },
    };
    rendered.unwrap_or_else(|| {
        log::warn!("no {} record for placement {}", placement.kind, placement.id);
        not_found(lang)
    })
}

pub fn not_found(lang: Language) -> Node {
    Node::new("div").class("not-found").text(text(lang, "modal.notFound"))
}

fn section(lang: Language, title_key: &str, children: impl IntoIterator<Item = Node>) -> Node {
    Node::new("div")
        .class("section")
        .child(heading(text(lang, title_key)))
        .children(children)
}

fn about(s: &About, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.about",
        [
            para(&s.summary).class("lead"),
            Node::new("div").class("grid-2").children([
                card([subheading(text(lang, "about.details")), bullets(&s.details)]),
                card([subheading(text(lang, "about.focusAreas")), bullets(&s.focus_areas)]),
            ]),
            card([subheading(text(lang, "about.learningStyle")), bullets(&s.learning_style)]),
        ],
    )
}

fn skills(s: &Skills, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.skills",
        s.categories.iter().map(|c| card([subheading(text(lang, &format!("skills.{}", c.key))), chips(&c.items)])),
    )
}

fn fact(label: impl Into<String>, value: &str) -> Node {
    Node::new("div")
        .class("fact")
        .children([Node::new("span").class("fact-label").text(label), Node::new("span").class("fact-value").text(value)])
}

fn education(s: &Education, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.education",
        [card([
            subheading(&s.institution),
            para(&s.degree),
            Node::new("div").class("grid-2").children([
                fact(text(lang, "education.period"), &s.period),
                fact(text(lang, "education.gpa"), &s.gpa),
                fact(text(lang, "education.year"), &s.year),
                fact(text(lang, "education.expectedGraduation"), &s.expected_graduation),
            ]),
            Node::new("h4").text(text(lang, "education.achievements")),
            bullets(&s.details),
        ])],
    )
}

fn experience(s: &Experience, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.experience",
        s.items.iter().map(|r| {
            card([
                subheading(&r.name),
                Node::new("p").class("role").text(&r.role),
                Node::new("span").class("period").text(&r.period),
                para(&r.description),
                Node::new("h4").text(text(lang, "experience.achievements")),
                bullets(&r.achievements),
            ])
        }),
    )
}

fn projects(s: &Projects, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.projects",
        s.items.iter().map(|p| {
            let mut c = card([
                subheading(&p.name),
                Node::new("span").class("period").text(&p.period),
                Node::new("p").class("role").text(&p.role),
                para(&p.description),
            ]);
            if !p.tech.is_empty() {
                c = c.child(chips(&p.tech));
            }
            if let Some(url) = &p.link {
                c = c.child(link(url, text(lang, "projects.viewProject")));
            }
            c
        }),
    )
}

fn languages(s: &Languages, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.languages",
        s.items.iter().map(|l| {
            let pct = l.proficiency.min(100);
            card([
                subheading(&l.name),
                Node::new("span").class("level").text(&l.level),
                Node::new("div")
                    .class("bar")
                    .attr("aria-label", format!("{} {pct}%", text(lang, "languages.proficiency")))
                    .child(
                        Node::new("div")
                            .class("bar-fill")
                            .attr("style", format!("width: {pct}%; background: {}", l.color)),
                    ),
            ])
        }),
    )
}

fn goals(s: &Goals, lang: Language) -> Node {
    section(
        lang,
        "modalTitles.goals",
        [
            para(&s.content).class("lead"),
            card([subheading(text(lang, "goals.careerGoals")), bullets(&s.career_goals)]),
            card([subheading(text(lang, "goals.avoidedPaths")), bullets(&s.avoided_paths)]),
        ],
    )
}

fn workflow(s: &Workflow, lang: Language) -> Node {
    let principles = Node::new("div").class("grid-4").children(s.principles.iter().enumerate().map(|(i, p)| {
        card([
            Node::new("span").class("step").text((i + 1).to_string()),
            Node::new("h4").text(&p.name),
            para(&p.description),
        ])
    }));
    section(
        lang,
        "modalTitles.workflow",
        [
            para(&s.approach).class("lead"),
            principles,
            card([
                subheading(text(lang, "workflow.principles")),
                Node::new("div").class("grid-2").children([
                    Node::new("div").children([Node::new("h4").text(text(lang, "workflow.preferred")), bullets(&s.preferred)]),
                    Node::new("div").children([Node::new("h4").text(text(lang, "workflow.tools")), bullets(&s.tools)]),
                ]),
            ]),
        ],
    )
}

fn contact(s: &Contact, lang: Language) -> Node {
    let mail = Node::new("a")
        .class("contact-card")
        .attr("href", format!("mailto:{}", s.email))
        .children([Node::new("span").class("fact-label").text(text(lang, "contact.email")), Node::new("span").text(&s.email)]);
    let place = Node::new("div")
        .class("contact-card")
        .children([fact(text(lang, "contact.location"), &s.location)]);
    let links = s.links.iter().map(|l| {
        let shown = l.url.strip_prefix("https://").unwrap_or(&l.url);
        link(&l.url, shown).class("contact-card").child(Node::new("span").class("fact-label").text(&l.label))
    });
    section(
        lang,
        "modalTitles.contact",
        [
            Node::new("div").class("grid-2").child(mail).child(place).children(links),
            card([para(text(lang, "contact.message"))]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{find, PLACEMENTS};

    fn title(n: &Node) -> String {
        n.find_class("modal-title")[0].text.clone().unwrap_or_default()
    }

    #[test]
    fn mcu_opens_about_me() {
        let mcu = find("mcu").unwrap();
        let summary = &content::portfolio().unwrap().about.summary;
        for (lang, expected) in [(Language::En, "ABOUT ME"), (Language::Tr, "HAKKIMDA")] {
            let panel = present(mcu, lang);
            assert_eq!(title(&panel), expected);
            assert!(panel.walk().iter().any(|n| n.text.as_deref() == Some(summary.as_str())));
        }
    }

    #[test]
    fn every_placement_renders_its_section() {
        for p in &PLACEMENTS {
            let panel = body(p, Language::En);
            assert!(panel.find_class("not-found").is_empty(), "{} fell through", p.id);
            assert!(!panel.text_content().contains('['), "{} has an untranslated key", p.id);
        }
    }

    #[test]
    fn dangling_data_key_renders_not_found() {
        let ghost = Placement { data_key: "hobbies", ..find("mcu").unwrap().clone() };
        assert_eq!(body(&ghost, Language::En).text_content(), "Information not found");
        assert_eq!(body(&ghost, Language::Tr).text_content(), "Bilgi bulunamadi");
    }

    #[test]
    fn mismatched_record_renders_not_found() {
        let wrong = Placement { data_key: "contact", ..find("osc").unwrap().clone() };
        assert_eq!(body(&wrong, Language::En).find_class("not-found").len(), 1);
    }

    #[test]
    fn header_carries_translated_label_and_close() {
        let panel = present(find("uart").unwrap(), Language::Tr);
        let label = panel.find_class("modal-label")[0].text.clone().unwrap();
        assert_eq!(label, text(Language::Tr, "components.uart"));
        let close = panel.find_class("modal-close")[0];
        assert_eq!(close.get_attr("aria-label"), Some("Kapat"));
    }

    #[test]
    fn contact_links_and_mailto() {
        let panel = body(find("uart").unwrap(), Language::En);
        let hrefs: Vec<&str> = panel.walk().iter().filter_map(|n| n.get_attr("href")).collect();
        assert!(hrefs.iter().any(|h| h.starts_with("mailto:")));
        assert!(hrefs.contains(&"https://github.com/siimsek"));
    }

    #[test]
    fn language_bars_are_bounded() {
        let panel = body(find("led").unwrap(), Language::En);
        let bars = panel.find_class("bar-fill");
        assert!(!bars.is_empty());
        for bar in bars {
            let style = bar.get_attr("style").unwrap();
            let pct: u32 = style["width: ".len()..style.find('%').unwrap()].parse().unwrap();
            assert!(pct <= 100);
        }
    }

    #[test]
    fn both_cap_placements_share_the_workflow_panel() {
        let a = body(find("cap1").unwrap(), Language::En);
        let b = body(find("cap2").unwrap(), Language::En);
        assert_eq!(a, b);
    }
}
