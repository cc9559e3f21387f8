//! Axis-aligned item container with overlap queries
//!
//! Stands in for a graphics-item scene: the play state creates sprite and
//! text items, moves them, and asks which items overlap a reference item or
//! rectangle. Query results come back in item insertion order, which makes
//! every "first reported match" rule in the simulation deterministic.

use glam::Vec2;

/// Axis-aligned rectangle (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }

    /// Whether `other` lies fully inside `self` (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.pos.x >= self.pos.x
            && other.right() <= self.right()
            && other.pos.y >= self.pos.y
            && other.bottom() <= self.bottom()
    }
}

/// How an overlap query matches candidate items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionMode {
    /// Any overlap with the reference rectangle
    Intersect,
    /// Overlaps the reference rectangle without lying fully inside it
    /// (border-contact queries)
    IntersectNotContain,
}

impl CollisionMode {
    fn matches(self, reference: &Rect, candidate: &Rect) -> bool {
        match self {
            CollisionMode::Intersect => reference.intersects(candidate),
            CollisionMode::IntersectNotContain => {
                reference.intersects(candidate) && !reference.contains_rect(candidate)
            }
        }
    }
}

/// Opaque handle to a scene item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(u32);

#[derive(Debug, Clone)]
enum ItemKind {
    Sprite,
    Text(String),
}

#[derive(Debug, Clone)]
struct Item {
    id: ItemId,
    rect: Rect,
    kind: ItemKind,
}

impl Item {
    /// Text items never participate in collision queries
    fn collidable(&self) -> bool {
        matches!(self.kind, ItemKind::Sprite)
    }
}

/// Bounded container of items
#[derive(Debug, Clone)]
pub struct Scene {
    size: Vec2,
    items: Vec<Item>,
    next_id: u32,
}

impl Scene {
    pub fn new(size: Vec2) -> Self {
        Self { size, items: Vec::new(), next_id: 1 }
    }

    /// Full extent of the scene as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.size)
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        id
    }

    fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|it| it.id == id)
    }

    /// Create a sprite of the given size at the origin
    pub fn add_sprite(&mut self, size: Vec2) -> ItemId {
        let id = self.alloc_id();
        self.items.push(Item {
            id,
            rect: Rect::new(Vec2::ZERO, size),
            kind: ItemKind::Sprite,
        });
        id
    }

    /// Create an empty text item at the given position
    pub fn add_text(&mut self, pos: Vec2) -> ItemId {
        let id = self.alloc_id();
        self.items.push(Item {
            id,
            rect: Rect::new(pos, Vec2::ZERO),
            kind: ItemKind::Text(String::new()),
        });
        id
    }

    pub fn set_text(&mut self, id: ItemId, text: &str) {
        if let Some(item) = self.item_mut(id) {
            if let ItemKind::Text(current) = &mut item.kind {
                current.clear();
                current.push_str(text);
            }
        }
    }

    pub fn text(&self, id: ItemId) -> Option<&str> {
        match &self.item(id)?.kind {
            ItemKind::Text(text) => Some(text),
            ItemKind::Sprite => None,
        }
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    pub fn position(&self, id: ItemId) -> Option<Vec2> {
        self.item(id).map(|it| it.rect.pos)
    }

    pub fn set_position(&mut self, id: ItemId, pos: Vec2) {
        if let Some(item) = self.item_mut(id) {
            item.rect.pos = pos;
        }
    }

    pub fn item_size(&self, id: ItemId) -> Option<Vec2> {
        self.item(id).map(|it| it.rect.size)
    }

    pub fn rect(&self, id: ItemId) -> Option<Rect> {
        self.item(id).map(|it| it.rect)
    }

    /// Destroy an item. Returns whether it existed.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|it| it.id != id);
        self.items.len() != before
    }

    /// Items overlapping the reference item, in insertion order. The
    /// reference itself is never part of the result.
    pub fn colliding_items(&self, reference: ItemId, mode: CollisionMode) -> Vec<ItemId> {
        match self.rect(reference) {
            Some(rect) => self
                .items
                .iter()
                .filter(|it| it.id != reference && it.collidable())
                .filter(|it| mode.matches(&rect, &it.rect))
                .map(|it| it.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Items overlapping an arbitrary rectangle, in insertion order
    pub fn colliding_with_rect(&self, rect: Rect, mode: CollisionMode) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|it| it.collidable())
            .filter(|it| mode.matches(&rect, &it.rect))
            .map(|it| it.id)
            .collect()
    }
}
