//! Card grids filled from remote data: featured repos, badges, resources
//!
//! Each loader shows a loading line, fetches, then renders cards. Failures
//! replace the grid text with a fixed message and go to the console; they
//! never propagate.

use gloo_net::http::Request;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::log_error;
use crate::core::paths::widgets as ids;
use crate::core::{badges, repos, resources};
use crate::core::badges::Badge;
use crate::core::repos::Repository;
use crate::core::resources::Resource;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] gloo_net::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("dom error: {0}")]
    Dom(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Dom(format!("{:?}", value))
    }
}

type WidgetResult<T> = Result<T, WidgetError>;

fn create(doc: &Document, tag: &str, class: Option<&str>) -> WidgetResult<Element> {
    let el = doc.create_element(tag)?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    Ok(el)
}

fn external_link(doc: &Document, class: Option<&str>, href: &str) -> WidgetResult<Element> {
    let a = create(doc, "a", class)?;
    a.set_attribute("href", href)?;
    a.set_attribute("target", "_blank")?;
    a.set_attribute("rel", "noopener noreferrer")?;
    Ok(a)
}

fn set_style(el: &Element, props: &[(&str, &str)]) -> WidgetResult<()> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        for (name, value) in props {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}

async fn fetch_ok(url: &str) -> WidgetResult<gloo_net::http::Response> {
    let resp = Request::get(url).send().await?;
    if !resp.ok() {
        return Err(WidgetError::Status(resp.status()));
    }
    Ok(resp)
}

/// Run a loader against the grid with `id`, mapping failure to `failed`
async fn with_grid<F, Fut>(id: &str, loading: &str, failed: &str, load: F)
where
    F: FnOnce(Document, Element) -> Fut,
    Fut: std::future::Future<Output = WidgetResult<()>>,
{
    let (Some(doc), Some(grid)) = (super::document(), super::by_id(id)) else { return };
    grid.set_text_content(Some(loading));
    if let Err(e) = load(doc, grid.clone()).await {
        grid.set_text_content(Some(failed));
        log_error!("[widgets] {}: {}", id, e);
    }
}

// =============================================================================
// Featured work
// =============================================================================

pub async fn load_featured(user: String, limit: usize) {
    with_grid(ids::FEATURED_GRID, repos::LOADING, repos::FAILED, |doc, grid| async move {
        let list: Vec<Repository> = fetch_ok(&repos::listing_url(&user)).await?.json().await?;
        let featured = repos::featured(list, limit);
        grid.set_inner_html("");
        if featured.is_empty() {
            grid.set_text_content(Some(repos::EMPTY));
            return Ok(());
        }
        for repo in &featured {
            let card = featured_card(&doc, repo)?;
            grid.append_child(&card)?;
        }
        Ok(())
    })
    .await
}

fn featured_card(doc: &Document, repo: &Repository) -> WidgetResult<Element> {
    let card = create(doc, "div", Some("featured-card"))?;
    set_style(&card, &[("position", "relative")])?;

    let title = create(doc, "h4", None)?;
    let link = external_link(doc, None, repo.link())?;
    link.set_text_content(Some(&repo.name));
    title.append_child(&link)?;
    card.append_child(&title)?;

    if !repo.description().is_empty() {
        let desc = create(doc, "p", None)?;
        desc.set_text_content(Some(repo.description()));
        desc.set_attribute("title", repo.description())?;
        if repo.needs_expansion() {
            ExpandOverlay::attach(card.clone(), desc.clone(), repo.description().to_string())?;
        }
        card.append_child(&desc)?;
    }

    let meta = create(doc, "div", Some("featured-meta"))?;
    let lang = create(doc, "span", None)?;
    let dot = create(doc, "span", Some("lang-dot"))?;
    set_style(&dot, &[("background", repo.language_color())])?;
    let lang_name = create(doc, "span", None)?;
    lang_name.set_text_content(Some(repo.language.as_deref().unwrap_or("")));
    lang.append_child(&dot)?;
    lang.append_child(&lang_name)?;
    let stars = create(doc, "span", Some("featured-stars"))?;
    stars.set_text_content(Some(&format!("⭐ {}", repo.stargazers_count)));
    meta.append_child(&lang)?;
    meta.append_child(&stars)?;
    card.append_child(&meta)?;

    let actions = create(doc, "div", Some("project-actions"))?;
    set_style(&actions, &[
        ("margin-top", "auto"),
        ("display", "flex"),
        ("justify-content", "flex-end"),
        ("align-items", "flex-end"),
    ])?;
    let learn_more = external_link(doc, Some("btn primary"), repo.link())?;
    learn_more.set_text_content(Some("Learn more"));
    learn_more.set_attribute("aria-label", &format!("Learn more about {}", repo.name))?;
    actions.append_child(&learn_more)?;
    card.append_child(&actions)?;

    Ok(card)
}

/// Full-description popover for long descriptions (hover or click)
struct ExpandOverlay {
    card: Element,
    desc: Element,
    text: String,
    shown: RefCell<Option<Element>>,
}

impl ExpandOverlay {
    fn attach(card: Element, desc: Element, text: String) -> WidgetResult<()> {
        let overlay = Rc::new(Self { card, desc: desc.clone(), text, shown: RefCell::new(None) });

        let o = overlay.clone();
        listen(&desc, "mouseenter", move || o.show())?;
        let o = overlay.clone();
        listen(&desc, "mouseleave", move || o.hide())?;
        let o = overlay;
        listen(&desc, "click", move || {
            if o.shown.borrow().is_some() { o.hide() } else { o.show() }
        })?;
        Ok(())
    }

    fn show(self: &Rc<Self>) {
        if self.shown.borrow().is_some() {
            return;
        }
        if let Err(e) = self.build() {
            log_error!("[widgets] expand overlay: {}", e);
        }
    }

    fn build(self: &Rc<Self>) -> WidgetResult<()> {
        let Some(doc) = super::document() else { return Ok(()) };
        let div = create(&doc, "div", Some("featured-card p expanded"))?;
        div.set_text_content(Some(&self.text));
        let top = self
            .desc
            .dyn_ref::<HtmlElement>()
            .map(|d| d.offset_top() + d.offset_height() + 8)
            .unwrap_or(0);
        let top = format!("{}px", top);
        set_style(&div, &[
            ("position", "absolute"),
            ("left", "0"),
            ("right", "0"),
            ("top", top.as_str()),
            ("background", "rgba(20,24,40,0.98)"),
            ("color", "#fff"),
            ("padding", "18px 16px"),
            ("border-radius", "10px"),
            ("z-index", "100"),
            ("box-shadow", "0 8px 32px rgba(0,0,0,0.28)"),
            ("min-width", "220px"),
            ("max-width", "440px"),
            ("font-size", "1rem"),
            ("line-height", "1.6"),
            ("cursor", "pointer"),
        ])?;
        let o = self.clone();
        listen(&div, "mouseleave", move || o.hide())?;
        let o = self.clone();
        listen(&div, "click", move || o.hide())?;
        self.card.append_child(&div)?;
        *self.shown.borrow_mut() = Some(div);
        Ok(())
    }

    fn hide(&self) {
        if let Some(div) = self.shown.borrow_mut().take() {
            div.remove();
        }
    }
}

fn listen<F: FnMut() + 'static>(target: &Element, event: &str, mut f: F) -> WidgetResult<()> {
    let cb = Closure::wrap(Box::new(move |_: web_sys::Event| f()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

// =============================================================================
// Achievements
// =============================================================================

pub async fn load_achievements(markdown_url: String) {
    with_grid(ids::ACHIEVEMENTS_GRID, badges::LOADING, badges::FAILED, |doc, grid| async move {
        let markdown = fetch_ok(&markdown_url).await?.text().await?;
        let found = badges::parse_badges(&markdown);
        if found.is_empty() {
            grid.set_text_content(Some(badges::EMPTY));
            return Ok(());
        }
        grid.set_inner_html("");
        for badge in &found {
            let card = badge_card(&doc, badge)?;
            grid.append_child(&card)?;
        }
        Ok(())
    })
    .await
}

fn badge_card(doc: &Document, badge: &Badge) -> WidgetResult<Element> {
    let card = external_link(doc, Some("achievement-card"), &badge.link_url)?;
    let img = create(doc, "img", None)?;
    img.set_attribute("src", &badge.image_url)?;
    let title = create(doc, "div", None)?;
    card.append_child(&img)?;
    card.append_child(&title)?;
    Ok(card)
}

// =============================================================================
// Resources
// =============================================================================

pub async fn load_resources(json_url: String) {
    with_grid(ids::RESOURCES_GRID, resources::LOADING, resources::FAILED, |doc, grid| async move {
        let value: serde_json::Value = fetch_ok(&json_url).await?.json().await?;
        let list = resources::parse_resources(value)?;
        if list.is_empty() {
            grid.set_text_content(Some(resources::EMPTY));
            return Ok(());
        }
        grid.set_inner_html("");
        for item in &list {
            let card = resource_card(&doc, item)?;
            grid.append_child(&card)?;
        }
        Ok(())
    })
    .await
}

fn resource_card(doc: &Document, item: &Resource) -> WidgetResult<Element> {
    let card = create(doc, "div", Some("resource-card"))?;

    let title = create(doc, "h3", None)?;
    title.set_text_content(Some(&item.title));
    card.append_child(&title)?;

    let desc = create(doc, "p", None)?;
    desc.set_text_content(Some(&item.description));
    card.append_child(&desc)?;

    if !item.tags.is_empty() {
        let meta = create(doc, "div", Some("resource-meta"))?;
        for tag in &item.tags {
            let tag_el = create(doc, "span", Some("resource-tag"))?;
            tag_el.set_text_content(Some(tag));
            meta.append_child(&tag_el)?;
        }
        card.append_child(&meta)?;
    }

    let actions = create(doc, "div", Some("resource-actions"))?;
    let download = external_link(doc, Some("btn primary"), &item.link)?;
    download.set_text_content(Some("Download"));
    download.set_attribute("aria-label", &item.download_label())?;
    actions.append_child(&download)?;
    card.append_child(&actions)?;

    Ok(card)
}
