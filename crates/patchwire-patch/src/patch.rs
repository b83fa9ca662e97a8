//! Named objects and the edits applied to them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use patchwire_core::{Dup, Engine, Graph, Processor, Sample, Sink, Value};
use patchwire_registry::{UnitContext, UnitKind, UnitRegistry};
use patchwire_units::NoteSource;

use crate::error::{PatchError, Result};

/// Name (and kind) of the built-in object standing for the engine's root.
pub const ENGINE_OBJECT: &str = "engine";

/// One wire: `from`'s output feeding `to`'s input slot `input`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Connection {
    /// Source object.
    pub from: String,
    /// Target object.
    pub to: String,
    /// Target input slot.
    pub input: String,
}

impl Connection {
    fn new(from: &str, to: &str, input: &str) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            input: input.to_owned(),
        }
    }
}

/// Listing entry returned by [`Patch::objects`].
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Object name.
    pub name: String,
    /// Kind name.
    pub kind: &'static str,
    /// Current constant, for value objects.
    pub value: Option<Sample>,
}

struct Object {
    kind: UnitKind,
    dup: Dup,
    value: Option<Sample>,
}

/// The live patch: named unit objects wired into one engine.
pub struct Patch {
    engine: Arc<Engine>,
    notes: Arc<dyn NoteSource>,
    registry: UnitRegistry,
    objects: BTreeMap<String, Object>,
    connections: BTreeSet<Connection>,
}

impl Patch {
    /// An empty patch on `engine`. MIDI kinds read from `notes`.
    pub fn new(engine: Arc<Engine>, notes: Arc<dyn NoteSource>) -> Self {
        Self {
            engine,
            notes,
            registry: UnitRegistry::new(),
            objects: BTreeMap::new(),
            connections: BTreeSet::new(),
        }
    }

    /// The engine this patch edits.
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Creates a unit object of kind `kind`. `value` is the initial constant
    /// for `value` objects and ignored otherwise.
    pub fn new_object(&mut self, name: &str, kind: &str, value: Sample) -> Result<()> {
        if kind == ENGINE_OBJECT {
            return Err(PatchError::EngineReserved("created"));
        }
        if name == ENGINE_OBJECT || self.objects.contains_key(name) {
            return Err(PatchError::DuplicateName(name.to_owned()));
        }
        let kind: UnitKind = kind.parse()?;
        let unit = kind.create(&UnitContext {
            value,
            notes: Arc::clone(&self.notes),
        });
        let dup = Dup::from_boxed(unit);

        self.engine.lock().add_ticker(dup.ticker());
        self.objects.insert(
            name.to_owned(),
            Object {
                kind,
                dup,
                value: (kind == UnitKind::Value).then_some(value),
            },
        );
        tracing::debug!(name, kind = %kind, "object created");
        Ok(())
    }

    /// Wires `from`'s output into `to`'s input `input`, replacing whatever
    /// was connected there before.
    pub fn connect(&mut self, from: &str, to: &str, input: &str) -> Result<()> {
        if from == ENGINE_OBJECT {
            return Err(PatchError::EngineReserved("used as a source"));
        }
        let source = self.object(from)?;
        if to != ENGINE_OBJECT {
            self.object(to)?;
        }

        let mut graph = self.engine.lock();
        let output = source.dup.output();
        wire(&mut graph, &self.objects, to, input, Box::new(output))?;

        self.connections.retain(|c| !(c.to == to && c.input == input));
        self.connections.insert(Connection::new(from, to, input));
        drop(graph);

        tracing::debug!(from, to, input, "connected");
        Ok(())
    }

    /// Removes the wire from `from` into `to.input`, leaving the input at
    /// constant zero.
    pub fn disconnect(&mut self, from: &str, to: &str, input: &str) -> Result<()> {
        let conn = Connection::new(from, to, input);
        if !self.connections.contains(&conn) {
            return Err(PatchError::NotConnected {
                from: conn.from,
                to: conn.to,
                input: conn.input,
            });
        }

        let mut graph = self.engine.lock();
        wire(&mut graph, &self.objects, to, input, Box::new(Value(0.0)))?;
        self.connections.remove(&conn);
        drop(graph);

        tracing::debug!(from, to, input, "disconnected");
        Ok(())
    }

    /// Changes the constant of a value object.
    pub fn set(&mut self, name: &str, value: Sample) -> Result<()> {
        if name == ENGINE_OBJECT {
            return Err(PatchError::EngineReserved("set"));
        }
        let object = self
            .objects
            .get_mut(name)
            .ok_or_else(|| PatchError::UnknownObject(name.to_owned()))?;
        if object.kind != UnitKind::Value {
            return Err(PatchError::NotAValue(name.to_owned()));
        }

        let _graph = self.engine.lock();
        object.dup.set_source(Box::new(Value(value)));
        object.value = Some(value);
        tracing::debug!(name, value, "value set");
        Ok(())
    }

    /// Removes an object: unregisters it, resets every input it fed and
    /// releases every output it consumed.
    pub fn destroy(&mut self, name: &str) -> Result<()> {
        if name == ENGINE_OBJECT {
            return Err(PatchError::EngineReserved("destroyed"));
        }
        self.object(name)?;

        let mut graph = self.engine.lock();
        let outgoing: Vec<Connection> = self
            .connections
            .iter()
            .filter(|c| c.from == name && c.to != name)
            .cloned()
            .collect();
        for c in &outgoing {
            wire(&mut graph, &self.objects, &c.to, &c.input, Box::new(Value(0.0)))?;
        }

        let Some(object) = self.objects.remove(name) else {
            return Err(PatchError::UnknownObject(name.to_owned()));
        };
        graph.remove_ticker(&object.dup.ticker());
        // Dropping the source releases its inputs, including any loop back
        // into this object.
        object.dup.set_source(Box::new(Value(0.0)));
        drop(object);

        self.connections.retain(|c| c.from != name && c.to != name);
        drop(graph);

        tracing::debug!(name, "object destroyed");
        Ok(())
    }

    /// Destroys every object, leaving the engine silent.
    pub fn clear(&mut self) {
        let names: Vec<String> = self.objects.keys().cloned().collect();
        for name in names {
            if let Err(e) = self.destroy(&name) {
                tracing::warn!(name, error = %e, "failed to destroy object");
            }
        }
    }

    /// Every kind name, including `engine`, mapped to its sorted inputs.
    pub fn kind_inputs(&self) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = self
            .registry
            .kind_inputs()
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect();
        map.insert(ENGINE_OBJECT.to_owned(), self.engine.inputs());
        map
    }

    /// The engine object followed by every unit object, by name.
    pub fn objects(&self) -> Vec<ObjectInfo> {
        std::iter::once(ObjectInfo {
            name: ENGINE_OBJECT.to_owned(),
            kind: ENGINE_OBJECT,
            value: None,
        })
        .chain(self.objects.iter().map(|(name, o)| ObjectInfo {
            name: name.clone(),
            kind: o.kind.id(),
            value: o.value,
        }))
        .collect()
    }

    /// Current wires, sorted.
    pub fn connections(&self) -> Vec<Connection> {
        self.connections.iter().cloned().collect()
    }

    /// Input names of one object.
    pub fn inputs(&self, name: &str) -> Result<Vec<String>> {
        if name == ENGINE_OBJECT {
            return Ok(self.engine.inputs());
        }
        Ok(self.object(name)?.dup.inputs())
    }

    fn object(&self, name: &str) -> Result<&Object> {
        self.objects
            .get(name)
            .ok_or_else(|| PatchError::UnknownObject(name.to_owned()))
    }
}

/// Assigns `processor` to `to.input`. The caller holds the engine lock.
fn wire(
    graph: &mut Graph,
    objects: &BTreeMap<String, Object>,
    to: &str,
    input: &str,
    processor: Box<dyn Processor>,
) -> Result<()> {
    if to == ENGINE_OBJECT {
        graph.input(input, processor)?;
    } else {
        let target = objects
            .get(to)
            .ok_or_else(|| PatchError::UnknownObject(to.to_owned()))?;
        target.dup.input(input, processor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{GraphError, HEADROOM};
    use patchwire_registry::RegistryError;
    use patchwire_units::NoteCell;

    fn patch() -> Patch {
        Patch::new(Arc::new(Engine::new()), Arc::new(NoteCell::new()))
    }

    fn live(patch: &Patch, name: &str) -> usize {
        patch.objects[name].dup.live_outputs()
    }

    #[test]
    fn new_object_registers_ticker() {
        let mut p = patch();
        p.new_object("osc", "sin", 0.0).unwrap();
        assert_eq!(p.engine.lock().ticker_count(), 1);
        assert_eq!(p.objects().len(), 2);
        assert_eq!(p.objects()[1].kind, "sin");
    }

    #[test]
    fn new_object_rejects_bad_names_and_kinds() {
        let mut p = patch();
        p.new_object("a", "value", 1.0).unwrap();
        assert_eq!(
            p.new_object("a", "sum", 0.0),
            Err(PatchError::DuplicateName("a".into()))
        );
        assert_eq!(
            p.new_object("engine", "sum", 0.0),
            Err(PatchError::DuplicateName("engine".into()))
        );
        assert_eq!(
            p.new_object("b", "engine", 0.0),
            Err(PatchError::EngineReserved("created"))
        );
        assert_eq!(
            p.new_object("b", "wobble", 0.0),
            Err(PatchError::Registry(RegistryError::UnknownKind(
                "wobble".into()
            )))
        );
        assert_eq!(p.engine.lock().ticker_count(), 1);
    }

    #[test]
    fn connect_into_engine_renders_source() {
        let mut p = patch();
        p.new_object("v", "value", 0.5).unwrap();
        p.connect("v", "engine", "in").unwrap();
        assert_eq!(p.engine.process()[0], 0.5 * HEADROOM);
        assert_eq!(p.connections(), vec![Connection::new("v", "engine", "in")]);
    }

    #[test]
    fn connect_validates_endpoints_and_slot() {
        let mut p = patch();
        p.new_object("v", "value", 0.5).unwrap();
        p.new_object("c", "clip", 0.0).unwrap();
        assert_eq!(
            p.connect("engine", "c", "in"),
            Err(PatchError::EngineReserved("used as a source"))
        );
        assert_eq!(
            p.connect("nope", "c", "in"),
            Err(PatchError::UnknownObject("nope".into()))
        );
        assert_eq!(
            p.connect("v", "nope", "in"),
            Err(PatchError::UnknownObject("nope".into()))
        );
        assert!(matches!(
            p.connect("v", "c", "gain"),
            Err(PatchError::Graph(GraphError::UnknownInput { .. }))
        ));
        assert!(matches!(
            p.connect("c", "v", "in"),
            Err(PatchError::Graph(GraphError::NotASink { .. }))
        ));
        assert!(p.connections().is_empty());
        assert_eq!(live(&p, "v"), 0, "rejected output was released");
    }

    #[test]
    fn reconnecting_an_input_replaces_the_wire() {
        let mut p = patch();
        p.new_object("a", "value", 0.25).unwrap();
        p.new_object("b", "value", 0.75).unwrap();
        p.connect("a", "engine", "in").unwrap();
        p.connect("b", "engine", "in").unwrap();

        assert_eq!(p.connections(), vec![Connection::new("b", "engine", "in")]);
        assert_eq!(live(&p, "a"), 0);
        assert_eq!(live(&p, "b"), 1);
        assert_eq!(p.engine.process()[0], 0.75 * HEADROOM);
    }

    #[test]
    fn fan_out_shares_one_computation() {
        let mut p = patch();
        p.new_object("n", "noise", 0.0).unwrap();
        p.new_object("diff", "sum", 0.0).unwrap();
        p.new_object("neg", "mul", 0.0).unwrap();
        p.new_object("minus", "value", -1.0).unwrap();
        // diff = n + (-1 * n) must be silent if both reads see the same block
        p.connect("n", "diff", "a").unwrap();
        p.connect("n", "neg", "a").unwrap();
        p.connect("minus", "neg", "b").unwrap();
        p.connect("neg", "diff", "b").unwrap();
        p.connect("diff", "engine", "in").unwrap();

        assert_eq!(live(&p, "n"), 2);
        for _ in 0..4 {
            assert!(p.engine.process().iter().all(|&s| s == 0.0));
        }
    }

    #[test]
    fn disconnect_resets_input_to_zero() {
        let mut p = patch();
        p.new_object("v", "value", 0.5).unwrap();
        p.connect("v", "engine", "in").unwrap();
        p.disconnect("v", "engine", "in").unwrap();

        assert_eq!(p.engine.process()[0], 0.0);
        assert_eq!(live(&p, "v"), 0);
        assert!(matches!(
            p.disconnect("v", "engine", "in"),
            Err(PatchError::NotConnected { .. })
        ));
    }

    #[test]
    fn set_changes_value_objects_only() {
        let mut p = patch();
        p.new_object("v", "value", 0.5).unwrap();
        p.new_object("s", "sin", 0.0).unwrap();
        p.connect("v", "engine", "in").unwrap();

        p.set("v", 0.1).unwrap();
        assert_eq!(p.engine.process()[0], 0.1 * HEADROOM);
        assert_eq!(p.objects()[2].value, Some(0.1));

        assert_eq!(p.set("s", 1.0), Err(PatchError::NotAValue("s".into())));
        assert_eq!(p.set("engine", 1.0), Err(PatchError::EngineReserved("set")));
        assert_eq!(
            p.set("x", 1.0),
            Err(PatchError::UnknownObject("x".into()))
        );
    }

    #[test]
    fn destroy_unwires_both_directions() {
        let mut p = patch();
        p.new_object("v", "value", 0.5).unwrap();
        p.new_object("c", "clip", 0.0).unwrap();
        p.connect("v", "c", "in").unwrap();
        p.connect("c", "engine", "in").unwrap();
        assert_eq!(live(&p, "v"), 1);

        p.destroy("c").unwrap();
        assert_eq!(live(&p, "v"), 0, "upstream output released");
        assert!(p.connections().is_empty());
        assert_eq!(p.engine.lock().ticker_count(), 1);
        assert_eq!(p.engine.process()[0], 0.0);
        assert_eq!(p.destroy("engine"), Err(PatchError::EngineReserved("destroyed")));
        assert_eq!(p.destroy("c"), Err(PatchError::UnknownObject("c".into())));
    }

    #[test]
    fn destroy_breaks_self_loops() {
        let mut p = patch();
        p.new_object("s", "sum", 0.0).unwrap();
        p.connect("s", "s", "b").unwrap();
        let weak = Arc::downgrade(&p.objects["s"].dup.ticker());

        p.destroy("s").unwrap();
        assert!(weak.upgrade().is_none(), "loop kept the object alive");
    }

    #[test]
    fn clear_removes_everything() {
        let mut p = patch();
        p.new_object("a", "sin", 0.0).unwrap();
        p.new_object("b", "env", 0.0).unwrap();
        p.connect("a", "b", "gate").unwrap();
        p.connect("b", "engine", "in").unwrap();
        p.clear();
        assert_eq!(p.objects().len(), 1);
        assert!(p.connections().is_empty());
        assert_eq!(p.engine.lock().ticker_count(), 0);
    }

    #[test]
    fn kind_inputs_include_engine() {
        let p = patch();
        let inputs = p.kind_inputs();
        assert_eq!(inputs["engine"], ["in"]);
        assert_eq!(inputs["env"], ["att", "dec", "gate", "trig"]);
        assert_eq!(p.inputs("engine").unwrap(), ["in"]);
    }
}
