use uuid::Uuid;

use crate::camera::{Point, Viewport};
use crate::consts::{NEW_OBJECT_NAME, NEW_TEXT_FONT_SIZE, NEW_TEXT_PLACEHOLDER, SYMBOL_BASE_SIZE};
use crate::doc::Document;
use crate::element::{
    ElementId, ElementKind, ElementPatch, Properties, SceneElement, ShapeKind, Style, TextFields, Transform,
};
use crate::input::{Command, DropTool, Key, Modifiers, shortcut};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Side effects the host should carry out after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene changed; redraw.
    RenderNeeded,
    /// Show the element context menu at a client-space position.
    OpenContextMenu { x: f64, y: f64 },
    /// Close any open context menu.
    CloseContextMenu,
    /// This many elements went to the clipboard.
    Copied(usize),
    /// This many elements were pasted.
    Pasted(usize),
    /// Open the inline text editor for a text element.
    EditText { id: ElementId, text: String },
}

/// Editor state the render adapter talks to: the document plus the stage
/// viewport. Every handler is synchronous and returns the actions the host
/// should perform.
#[derive(Default)]
pub struct EditorCore {
    pub doc: Document,
    pub viewport: Viewport,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(doc: Document) -> Self {
        Self { doc, viewport: Viewport::default() }
    }

    // --- Pointer events ---

    /// A sidebar item was dropped at `screen`. Creates the element at the
    /// matching document position and selects it.
    pub fn on_drop(&mut self, screen: Point, tool: &DropTool) -> ElementId {
        let at = self.viewport.screen_to_world(screen);
        let element = new_element(Uuid::new_v4().to_string(), at, tool);
        let id = element.id.clone();
        self.doc.add_element(element);
        id
    }

    /// Click or tap. `target` is the element hit, `None` for the background.
    pub fn on_click(&mut self, target: Option<&str>, modifiers: Modifiers, client: Point) -> Vec<Action> {
        let Some(id) = target else {
            self.doc.clear_selection();
            return vec![Action::CloseContextMenu, Action::RenderNeeded];
        };
        if self.doc.get(id).is_none() {
            return Vec::new();
        }

        if modifiers.extends_selection() {
            self.doc.toggle_selection(id);
            return vec![Action::RenderNeeded];
        }

        if !self.doc.is_selected(id) {
            self.doc.set_selection([id]);
            return vec![Action::RenderNeeded];
        }
        if self.doc.selection().len() > 1 {
            return vec![Action::OpenContextMenu { x: client.x, y: client.y }];
        }
        Vec::new()
    }

    /// Right click. Selects the target if it was not already part of the
    /// selection, then opens the menu. Background right clicks close it.
    pub fn on_context_menu(&mut self, target: Option<&str>, client: Point) -> Vec<Action> {
        let Some(id) = target.filter(|id| self.doc.get(id).is_some()) else {
            return vec![Action::CloseContextMenu];
        };
        let mut actions = Vec::new();
        if !self.doc.is_selected(id) {
            self.doc.set_selection([id]);
            actions.push(Action::RenderNeeded);
        }
        actions.push(Action::OpenContextMenu { x: client.x, y: client.y });
        actions
    }

    /// A drag finished with the element at document position `(x, y)`.
    pub fn on_drag_end(&mut self, id: &str, x: f64, y: f64) -> Vec<Action> {
        self.doc.update_elements(&[id.to_owned()], |prev| {
            ElementPatch::transform(Transform { x, y, ..prev.transform.clone() })
        });
        vec![Action::RenderNeeded]
    }

    /// A transformer gesture (resize/rotate) finished.
    pub fn on_transform_end(&mut self, id: &str, transform: Transform) -> Vec<Action> {
        self.doc.patch_elements(&[id.to_owned()], &ElementPatch::transform(transform));
        vec![Action::RenderNeeded]
    }

    /// Wheel over the stage at `pointer` (stage-relative pixels).
    pub fn on_wheel(&mut self, pointer: Point, wheel_dy: f64) -> Vec<Action> {
        self.viewport.zoom_at(pointer, wheel_dy);
        vec![Action::RenderNeeded]
    }

    // --- Keyboard ---

    /// Key press. Keys typed into a text field are ignored.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, in_text_field: bool) -> Vec<Action> {
        if in_text_field {
            return Vec::new();
        }
        match shortcut(key, modifiers) {
            Some(command) => self.execute(command),
            None => Vec::new(),
        }
    }

    /// Run an editor command against the current selection.
    pub fn execute(&mut self, command: Command) -> Vec<Action> {
        let selection = self.doc.selection().to_vec();
        match command {
            Command::Delete => {
                if selection.is_empty() {
                    return Vec::new();
                }
                self.doc.delete_elements(&selection);
                vec![Action::RenderNeeded]
            }
            Command::Copy => match self.doc.copy() {
                0 => Vec::new(),
                n => vec![Action::Copied(n)],
            },
            Command::Paste => match self.doc.paste().len() {
                0 => Vec::new(),
                n => vec![Action::Pasted(n), Action::RenderNeeded],
            },
            Command::Duplicate => {
                if self.doc.duplicate_elements(&selection).is_empty() {
                    return Vec::new();
                }
                vec![Action::RenderNeeded]
            }
            Command::Undo => self.history_step(Document::undo),
            Command::Redo => self.history_step(Document::redo),
            Command::Nudge { dx, dy } => {
                let movable: Vec<ElementId> = self
                    .doc
                    .selected_elements()
                    .into_iter()
                    .filter(|el| !el.is_locked())
                    .map(|el| el.id.clone())
                    .collect();
                if movable.is_empty() {
                    return Vec::new();
                }
                self.doc
                    .update_elements(&movable, |prev| ElementPatch::transform(prev.transform.translated(dx, dy)));
                vec![Action::RenderNeeded]
            }
        }
    }

    // --- Text editing ---

    /// Open the inline editor for a text element. Other kinds are ignored.
    #[must_use]
    pub fn begin_text_edit(&self, id: &str) -> Option<Action> {
        match &self.doc.get(id)?.kind {
            ElementKind::Text(fields) => Some(Action::EditText { id: id.to_owned(), text: fields.text.clone() }),
            _ => None,
        }
    }

    /// Commit edited text back into a text element.
    pub fn commit_text_edit(&mut self, id: &str, text: &str) -> Vec<Action> {
        if !matches!(self.doc.get(id).map(|el| &el.kind), Some(ElementKind::Text(_))) {
            return Vec::new();
        }
        self.doc.update_elements(&[id.to_owned()], |prev| match &prev.kind {
            ElementKind::Text(fields) => {
                ElementPatch::kind(ElementKind::Text(TextFields { text: text.to_owned(), ..fields.clone() }))
            }
            _ => ElementPatch::default(),
        });
        vec![Action::RenderNeeded]
    }

    fn history_step(&mut self, step: fn(&mut Document) -> bool) -> Vec<Action> {
        if step(&mut self.doc) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }
}

/// Build the element a drop creates at document position `at`.
fn new_element(id: ElementId, at: Point, tool: &DropTool) -> SceneElement {
    let transform = Transform::at(at.x, at.y);
    let properties = Properties { name: Some(NEW_OBJECT_NAME.to_owned()), ..Properties::default() };
    let base_style = Style { opacity: Some(1.0), ..Style::default() };

    let element = match tool {
        DropTool::Rect => SceneElement::shape(id, ShapeKind::Rectangle, transform).with_style(Style {
            fill: Some("#ff0000".to_owned()),
            stroke_width: Some(1.0),
            ..base_style
        }),
        DropTool::Circle => SceneElement::shape(id, ShapeKind::Circle, transform).with_style(Style {
            fill: Some("#0000ff".to_owned()),
            stroke_width: Some(1.0),
            ..base_style
        }),
        DropTool::Text => {
            let fields = TextFields { font_size: NEW_TEXT_FONT_SIZE, ..TextFields::new(NEW_TEXT_PLACEHOLDER) };
            SceneElement::new(id, ElementKind::Text(fields), transform).with_style(base_style)
        }
        DropTool::Symbol { symbol_id, image_size } => {
            let (width, height) = fit_symbol(*image_size);
            SceneElement::symbol(id, *symbol_id, transform.with_size(width, height)).with_style(base_style)
        }
    };
    element.with_properties(properties)
}

/// Fit an image of the given natural size into the symbol base box,
/// preserving aspect ratio. Unknown or degenerate sizes get the full box.
fn fit_symbol(image_size: Option<(f64, f64)>) -> (f64, f64) {
    match image_size {
        Some((w, h)) if w > 0.0 && h > 0.0 => {
            let aspect = w / h;
            if aspect > 1.0 {
                (SYMBOL_BASE_SIZE, SYMBOL_BASE_SIZE / aspect)
            } else {
                (SYMBOL_BASE_SIZE * aspect, SYMBOL_BASE_SIZE)
            }
        }
        _ => (SYMBOL_BASE_SIZE, SYMBOL_BASE_SIZE),
    }
}
