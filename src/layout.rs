//! A small element tree produced by the presenters and turned into DOM
//! by the browser layer. Keeping it as data lets the content be checked
//! without a document.

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    pub text: Option<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, ..Self::default() }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }

    /// All text in document order, space separated.
    pub fn text_content(&self) -> String {
        let mut out = Vec::new();
        self.collect_text(&mut out);
        out.join(" ")
    }

    fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(t) = &self.text {
            out.push(t);
        }
        for c in &self.children {
            c.collect_text(out);
        }
    }

    /// Depth-first walk.
    pub fn walk(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for c in &self.children {
            out.extend(c.walk());
        }
        out
    }

    pub fn find_class(&self, class: &str) -> Vec<&Node> {
        self.walk().into_iter().filter(|n| n.class == Some(class)).collect()
    }
}

pub fn heading(text: impl Into<String>) -> Node {
    Node::new("h2").class("modal-title").text(text)
}

pub fn subheading(text: impl Into<String>) -> Node {
    Node::new("h3").class("card-title").text(text)
}

pub fn para(text: impl Into<String>) -> Node {
    Node::new("p").text(text)
}

pub fn bullets<S: AsRef<str>>(items: &[S]) -> Node {
    Node::new("ul")
        .class("bullets")
        .children(items.iter().map(|i| Node::new("li").text(i.as_ref())))
}

pub fn chips<S: AsRef<str>>(items: &[S]) -> Node {
    Node::new("div")
        .class("chips")
        .children(items.iter().map(|i| Node::new("span").class("chip").text(i.as_ref())))
}

pub fn card(children: impl IntoIterator<Item = Node>) -> Node {
    Node::new("div").class("card-pcb").children(children)
}

/// External link that opens in a new tab.
pub fn link(href: impl Into<String>, text: impl Into<String>) -> Node {
    Node::new("a")
        .attr("href", href)
        .attr("target", "_blank")
        .attr("rel", "noopener noreferrer")
        .text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_collected_in_order() {
        let n = card([subheading("Tools"), bullets(&["Multimeter", "Logic Analyzers"])]);
        assert_eq!(n.text_content(), "Tools Multimeter Logic Analyzers");
        assert_eq!(n.find_class("bullets").len(), 1);
    }

    #[test]
    fn links_open_in_a_new_tab() {
        let a = link("https://example.org", "site");
        assert_eq!(a.get_attr("target"), Some("_blank"));
        assert_eq!(a.get_attr("missing"), None);
    }
}
