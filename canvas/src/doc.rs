//! Document store: the ordered element list, board metadata, selection,
//! clipboard and undo history of one open board.
//!
//! The present history entry is the live document. Every mutating operation
//! builds the next `Snapshot` from the present one and pushes it, so undo and
//! redo are pure cursor moves. Array order is paint order: later elements are
//! drawn on top.
//!
//! All operations are synchronous and infallible. Ids passed in that do not
//! match any element are ignored.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_MAP_SCALE, PASTE_OFFSET};
use crate::element::{ElementId, ElementPatch, SceneElement};
use crate::history::History;

/// How the board background is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    #[default]
    Page,
    Paper,
    Map,
}

impl BoardType {
    /// Parse a metadata value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "page" => Some(Self::Page),
            "paper" => Some(Self::Paper),
            "map" => Some(Self::Map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Paper => "paper",
            Self::Map => "map",
        }
    }
}

/// Board-level settings captured in every snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardMetadata {
    pub board_type: BoardType,
    pub background_image_url: Option<String>,
    /// Map scale denominator (50 000 means 1:50 000).
    pub map_scale: f64,
}

impl Default for BoardMetadata {
    fn default() -> Self {
        Self { board_type: BoardType::Page, background_image_url: None, map_scale: DEFAULT_MAP_SCALE }
    }
}

/// Full value copy of the document at one point in history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub elements: Vec<SceneElement>,
    pub board: BoardMetadata,
}

/// Z-order move applied by [`Document::move_elements`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZOrder {
    /// To the end of the array (top).
    Front,
    /// To the start of the array (bottom).
    Back,
    /// One step toward the top.
    Forward,
    /// One step toward the bottom.
    Backward,
}

pub struct Document {
    history: History<Snapshot>,
    selection: Vec<ElementId>,
    clipboard: Vec<SceneElement>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty page board with a single history entry.
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self { history: History::new(snapshot), selection: Vec::new(), clipboard: Vec::new() }
    }

    /// Replace the document with freshly loaded content. History restarts at
    /// the loaded snapshot; selection is cleared. The clipboard survives.
    pub fn load(&mut self, snapshot: Snapshot) {
        self.history.reset(snapshot);
        self.selection.clear();
    }

    // --- Queries ---

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        self.history.present()
    }

    #[must_use]
    pub fn elements(&self) -> &[SceneElement] {
        &self.snapshot().elements
    }

    #[must_use]
    pub fn board(&self) -> &BoardMetadata {
        &self.snapshot().board
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SceneElement> {
        self.elements().iter().find(|el| el.id == id)
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements().iter().position(|el| el.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s == id)
    }

    /// Selected elements in paint order.
    #[must_use]
    pub fn selected_elements(&self) -> Vec<&SceneElement> {
        self.elements().iter().filter(|el| self.is_selected(&el.id)).collect()
    }

    #[must_use]
    pub fn clipboard(&self) -> &[SceneElement] {
        &self.clipboard
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    // --- Selection ---

    /// Replace the selection. Unknown and repeated ids are dropped.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ElementId>,
    {
        let mut next: Vec<ElementId> = Vec::new();
        for id in ids {
            let id = id.into();
            if self.get(&id).is_some() && !next.contains(&id) {
                next.push(id);
            }
        }
        self.selection = next;
    }

    /// Add `id` to the selection, or remove it if already selected.
    pub fn toggle_selection(&mut self, id: &str) {
        if self.is_selected(id) {
            self.selection.retain(|s| s != id);
        } else if self.get(id).is_some() {
            self.selection.push(id.to_owned());
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Mutators ---

    /// Append on top of the z-order and select it.
    pub fn add_element(&mut self, element: SceneElement) {
        let id = element.id.clone();
        self.commit(|snap| snap.elements.push(element));
        self.selection = vec![id];
    }

    /// Merge the patch returned by `update` into every element whose id is in
    /// `ids`. Always records a history entry, even when nothing changed.
    pub fn update_elements<F>(&mut self, ids: &[ElementId], mut update: F)
    where
        F: FnMut(&SceneElement) -> ElementPatch,
    {
        self.commit(|snap| {
            for el in snap.elements.iter_mut().filter(|el| ids.contains(&el.id)) {
                update(el).apply_to(el);
            }
        });
    }

    /// Merge the same patch into every element whose id is in `ids`.
    pub fn patch_elements(&mut self, ids: &[ElementId], patch: &ElementPatch) {
        self.update_elements(ids, |_| patch.clone());
    }

    pub fn delete_elements(&mut self, ids: &[ElementId]) {
        self.commit(|snap| snap.elements.retain(|el| !ids.contains(&el.id)));
        self.selection.retain(|s| !ids.contains(s));
    }

    /// Clone the matching elements under fresh ids, offset by
    /// [`PASTE_OFFSET`], and select the clones. Returns the new ids; when
    /// nothing matches, the document and history are untouched.
    pub fn duplicate_elements(&mut self, ids: &[ElementId]) -> Vec<ElementId> {
        let sources: Vec<SceneElement> =
            self.elements().iter().filter(|el| ids.contains(&el.id)).cloned().collect();
        self.insert_offset_copies(&sources)
    }

    /// Reorder the element array.
    ///
    /// `Front`/`Back` are stable partitions. `Forward` walks from the second
    /// to last slot down to the first, swapping a moving element with an
    /// unmoving successor; `Backward` mirrors that from the second slot up. A
    /// block of adjacent moving elements therefore steps as one.
    pub fn move_elements(&mut self, ids: &[ElementId], to: ZOrder) {
        self.commit(|snap| {
            let elements = &mut snap.elements;
            let moving = |el: &SceneElement| ids.contains(&el.id);
            match to {
                ZOrder::Front | ZOrder::Back => {
                    let (picked, rest): (Vec<_>, Vec<_>) = elements.drain(..).partition(|el| moving(el));
                    if to == ZOrder::Front {
                        elements.extend(rest);
                        elements.extend(picked);
                    } else {
                        elements.extend(picked);
                        elements.extend(rest);
                    }
                }
                ZOrder::Forward => {
                    for i in (0..elements.len().saturating_sub(1)).rev() {
                        if moving(&elements[i]) && !moving(&elements[i + 1]) {
                            elements.swap(i, i + 1);
                        }
                    }
                }
                ZOrder::Backward => {
                    for i in 1..elements.len() {
                        if moving(&elements[i]) && !moving(&elements[i - 1]) {
                            elements.swap(i, i - 1);
                        }
                    }
                }
            }
        });
    }

    /// Copy the selected elements into the clipboard slot. Returns how many
    /// were copied; an empty selection leaves the clipboard as it was.
    pub fn copy(&mut self) -> usize {
        let selected: Vec<SceneElement> = self.selected_elements().into_iter().cloned().collect();
        if selected.is_empty() {
            return 0;
        }
        let count = selected.len();
        self.clipboard = selected;
        count
    }

    /// Insert offset copies of the clipboard under fresh ids and select them.
    /// Pasting again yields copies at the same offset from the originals.
    pub fn paste(&mut self) -> Vec<ElementId> {
        let sources = self.clipboard.clone();
        self.insert_offset_copies(&sources)
    }

    pub fn set_board_type(&mut self, board_type: BoardType) {
        self.commit(|snap| snap.board.board_type = board_type);
    }

    pub fn set_background_image_url(&mut self, url: Option<String>) {
        self.commit(|snap| snap.board.background_image_url = url);
    }

    pub fn set_map_scale(&mut self, map_scale: f64) {
        self.commit(|snap| snap.board.map_scale = map_scale);
    }

    // --- History ---

    /// Step back one snapshot. Returns false at the start of history.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.prune_selection();
        true
    }

    /// Step forward one snapshot. Returns false at the end of history.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.prune_selection();
        true
    }

    // --- Internals ---

    fn commit<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut Snapshot),
    {
        let mut next = self.history.present().clone();
        mutate(&mut next);
        self.history.push(next);
    }

    fn insert_offset_copies(&mut self, sources: &[SceneElement]) -> Vec<ElementId> {
        if sources.is_empty() {
            return Vec::new();
        }
        let copies: Vec<SceneElement> = sources
            .iter()
            .map(|el| el.cloned_with_offset(Uuid::new_v4().to_string(), PASTE_OFFSET, PASTE_OFFSET))
            .collect();
        let ids: Vec<ElementId> = copies.iter().map(|el| el.id.clone()).collect();
        self.commit(|snap| snap.elements.extend(copies));
        self.selection.clone_from(&ids);
        ids
    }

    fn prune_selection(&mut self) {
        let present = self.history.present();
        self.selection.retain(|id| present.elements.iter().any(|el| &el.id == id));
    }
}
