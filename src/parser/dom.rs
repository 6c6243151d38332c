use scraper::{ElementRef, Html};

/// How an element's `class` attribute must look to be selected.
#[derive(Debug, Clone, Copy)]
pub enum ClassFilter<'a> {
    Any,
    /// No `class` attribute, or an empty one.
    Unclassed,
    /// The whole attribute equals this value.
    Exact(&'a str),
}

impl ClassFilter<'_> {
    fn matches(&self, class: Option<&str>) -> bool {
        match self {
            ClassFilter::Any => true,
            ClassFilter::Unclassed => class.map_or(true, str::is_empty),
            ClassFilter::Exact(wanted) => class == Some(*wanted),
        }
    }
}

pub fn parse(body: &str) -> Html {
    Html::parse_document(body)
}

/// All `tag` elements passing `class`, in document order.
pub fn find_all<'a>(doc: &'a Html, tag: &str, class: ClassFilter<'_>) -> Vec<ElementRef<'a>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == tag && class.matches(el.value().attr("class")))
        .collect()
}

pub fn text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

pub fn attribute<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"<html><body><table><tr>
        <td class="cislo">1</td>
        <td class="cislo wide">2</td>
        <td>3</td>
        <td class="">4</td>
        <td class="overflow_name">5</td>
    </tr></table><h3>first</h3></body></html>"#;

    fn texts(els: &[ElementRef<'_>]) -> Vec<String> {
        els.iter().map(text).collect()
    }

    #[test]
    fn exact_class_ignores_multi_class_cells() {
        let doc = parse(HTML);
        let cells = find_all(&doc, "td", ClassFilter::Exact("cislo"));
        assert_eq!(texts(&cells), vec!["1"]);
    }

    #[test]
    fn unclassed_accepts_missing_and_empty_class() {
        let doc = parse(HTML);
        let cells = find_all(&doc, "td", ClassFilter::Unclassed);
        assert_eq!(texts(&cells), vec!["3", "4"]);
    }

    #[test]
    fn any_keeps_document_order() {
        let doc = parse(HTML);
        let cells = find_all(&doc, "td", ClassFilter::Any);
        assert_eq!(texts(&cells), vec!["1", "2", "3", "4", "5"]);
        assert!(find_all(&doc, "h3", ClassFilter::Exact("cislo")).is_empty());
    }

    #[test]
    fn attribute_lookup() {
        let doc = parse(r#"<a href="ps311?x=1">X</a><a name="top"></a>"#);
        let anchors = find_all(&doc, "a", ClassFilter::Any);
        assert_eq!(attribute(&anchors[0], "href"), Some("ps311?x=1"));
        assert_eq!(attribute(&anchors[1], "href"), None);
    }
}
