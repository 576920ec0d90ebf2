// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene object list: ordered records with monotonic ids, plus the rename
//! edit buffer that targets a list index.

use std::fmt;

/// Byte capacity of the rename field, terminator excluded.
pub const RENAME_CAPACITY: usize = 63;

/// Primitive a scene object draws as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Triangle,
    Cube,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 2] = [ObjectKind::Triangle, ObjectKind::Cube];

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Triangle => "Triangle",
            ObjectKind::Cube => "Cube",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identifier; never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub name: String,
}

/// Insertion-ordered object list. All index-based operations ignore
/// out-of-range indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneObjects {
    objects: Vec<SceneObject>,
    next_id: u64,
}

impl SceneObjects {
    /// A list holding one default object of `kind` (id 0).
    pub fn with_default(kind: ObjectKind) -> Self {
        let mut list = Self::default();
        list.add(kind);
        list
    }

    /// Append a fresh object named `"<Kind> <id>"`.
    pub fn add(&mut self, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            id,
            kind,
            name: default_name(kind, id),
        });
        id
    }

    /// Same as [`SceneObjects::add`] with the kind of the object at `index`.
    /// The source name is not copied.
    pub fn duplicate(&mut self, index: usize) -> Option<ObjectId> {
        let kind = self.objects.get(index)?.kind;
        Some(self.add(kind))
    }

    /// Overwrite the name at `index`. Returns `false` (and changes nothing)
    /// when the index is stale.
    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        match self.objects.get_mut(index) {
            Some(obj) => {
                obj.name = name.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, index: usize) -> Option<SceneObject> {
        (index < self.objects.len()).then(|| self.objects.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&SceneObject> {
        self.objects.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    /// Id the next `add` will hand out.
    pub fn next_id(&self) -> ObjectId {
        ObjectId(self.next_id)
    }
}

pub fn default_name(kind: ObjectKind, id: ObjectId) -> String {
    format!("{kind} {id}")
}

/// Shift an index-valued reference (rename target, selection) after the
/// element at `deleted` was removed.
pub fn retarget_after_delete(target: Option<usize>, deleted: usize) -> Option<usize> {
    match target {
        Some(t) if t == deleted => None,
        Some(t) if t > deleted => Some(t - 1),
        other => other,
    }
}

/// Open rename dialog state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameEdit {
    pub target: Option<usize>,
    pub kind: ObjectKind,
    pub buffer: String,
}

impl RenameEdit {
    pub fn new(target: usize, object: &SceneObject) -> Self {
        Self {
            target: Some(target),
            kind: object.kind,
            buffer: clamp_to_capacity(&object.name).to_owned(),
        }
    }

    /// Dialog title, e.g. "Rename Triangle".
    pub fn title(&self) -> String {
        format!("Rename {}", self.kind)
    }

    /// Re-apply the capacity limit after the text field edited the buffer.
    pub fn enforce_capacity(&mut self) {
        let keep = clamp_to_capacity(&self.buffer).len();
        self.buffer.truncate(keep);
    }
}

/// Longest prefix of `text` that fits [`RENAME_CAPACITY`] bytes without
/// splitting a character.
pub fn clamp_to_capacity(text: &str) -> &str {
    if text.len() <= RENAME_CAPACITY {
        return text;
    }
    let mut end = RENAME_CAPACITY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn names(list: &SceneObjects) -> Vec<&str> {
        list.iter().map(|o| o.name.as_str()).collect()
    }

    #[test]
    fn add_delete_rename_duplicate_scenario() {
        let mut list = SceneObjects::with_default(ObjectKind::Triangle);
        assert_eq!(names(&list), vec!["Triangle 0"]);

        assert_eq!(list.add(ObjectKind::Triangle), ObjectId(1));
        assert_eq!(names(&list), vec!["Triangle 0", "Triangle 1"]);

        list.delete(0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().id, ObjectId(1));

        assert!(list.rename(0, "Hull"));
        assert_eq!(names(&list), vec!["Hull"]);

        assert_eq!(list.duplicate(0), Some(ObjectId(2)));
        assert_eq!(names(&list), vec!["Hull", "Triangle 2"]);
    }

    #[test]
    fn duplicate_keeps_source_kind_not_name() {
        let mut list = SceneObjects::default();
        list.add(ObjectKind::Cube);
        list.rename(0, "Crate");
        list.duplicate(0);
        let dup = list.get(1).unwrap();
        assert_eq!(dup.kind, ObjectKind::Cube);
        assert_eq!(dup.name, "Cube 1");
    }

    #[test]
    fn stale_indices_are_ignored() {
        let mut list = SceneObjects::with_default(ObjectKind::Triangle);
        let before = list.clone();
        assert!(!list.rename(5, "ghost"));
        assert!(list.delete(1).is_none());
        assert!(list.duplicate(9).is_none());
        assert_eq!(list, before);
        assert_eq!(list.next_id(), ObjectId(1));
    }

    #[test]
    fn retarget_rules() {
        assert_eq!(retarget_after_delete(Some(2), 2), None);
        assert_eq!(retarget_after_delete(Some(3), 1), Some(2));
        assert_eq!(retarget_after_delete(Some(0), 1), Some(0));
        assert_eq!(retarget_after_delete(None, 0), None);
    }

    #[test]
    fn ids_keep_counting_after_deletes() {
        let mut list = SceneObjects::with_default(ObjectKind::Triangle);
        list.delete(0);
        assert!(list.is_empty());
        list.add(ObjectKind::Triangle);
        list.add(ObjectKind::Triangle);
        assert_eq!(names(&list), vec!["Triangle 1", "Triangle 2"]);
    }

    #[test]
    fn rename_buffer_respects_capacity_on_char_boundary() {
        let long = "é".repeat(40); // 80 bytes
        let obj = SceneObject {
            id: ObjectId(0),
            kind: ObjectKind::Triangle,
            name: long,
        };
        let mut edit = RenameEdit::new(0, &obj);
        assert!(edit.buffer.len() <= RENAME_CAPACITY);
        assert_eq!(edit.buffer.len(), 62);
        assert_eq!(edit.title(), "Rename Triangle");

        edit.buffer = "x".repeat(100);
        edit.enforce_capacity();
        assert_eq!(edit.buffer.len(), RENAME_CAPACITY);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(bool),
        Duplicate(usize),
        Delete(usize),
        Rename(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Add),
            (0usize..12).prop_map(Op::Duplicate),
            (0usize..12).prop_map(Op::Delete),
            (0usize..12).prop_map(Op::Rename),
        ]
    }

    proptest! {
        #[test]
        fn ids_are_unique_and_never_reused(ops in prop::collection::vec(op(), 0..64)) {
            let mut list = SceneObjects::with_default(ObjectKind::Triangle);
            let mut ever_issued: HashSet<ObjectId> = HashSet::from([ObjectId(0)]);
            for op in ops {
                match op {
                    Op::Add(cube) => {
                        let kind = if cube { ObjectKind::Cube } else { ObjectKind::Triangle };
                        let id = list.add(kind);
                        prop_assert!(ever_issued.insert(id), "id {id} reused");
                    }
                    Op::Duplicate(i) => {
                        if let Some(id) = list.duplicate(i) {
                            prop_assert!(ever_issued.insert(id), "id {id} reused");
                        }
                    }
                    Op::Delete(i) => {
                        list.delete(i);
                    }
                    Op::Rename(i) => {
                        let ids_before: Vec<_> = list.iter().map(|o| o.id).collect();
                        list.rename(i, "renamed");
                        let ids_after: Vec<_> = list.iter().map(|o| o.id).collect();
                        prop_assert_eq!(ids_before, ids_after);
                    }
                }
                let live: HashSet<_> = list.iter().map(|o| o.id).collect();
                prop_assert_eq!(live.len(), list.len());
            }
        }
    }
}
