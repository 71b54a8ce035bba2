//! Directive engine: parse, bind and route interactions.

use tracing::{debug, info};

use crate::action::{Action, ActionRegistry, OnceListener};
use crate::diagnostic::{Diagnostic, report};
use crate::directive::{Directive, resolve, source_lines};
use crate::dispatch::Dispatcher;
use crate::dom::{Host, NodeId};
use crate::grammar::Grammar;
use crate::modules::Module;
use crate::observer::{Binding, observe};

/// Script content types scanned by [`Engine::parse_scripts`] by default.
pub const DEFAULT_SCRIPT_TYPES: &[&str] = &["text/ShortHand", "text/ProtoScript"];

/// Coordinator owning the page, the action registry and the parsed directives.
///
/// Independent engines never share state: each one has its own registry,
/// so actions registered on one are invisible to another.
///
/// The engine is single-threaded and event-driven. The host reports
/// interactions through [`fire`](Self::fire); everything else happens during
/// [`parse_scripts`](Self::parse_scripts) / [`parse_source`](Self::parse_source).
pub struct Engine<H> {
    host: H,
    grammar: Grammar,
    script_types: Vec<String>,
    registry: ActionRegistry,
    directives: Vec<Directive>,
    bindings: Vec<Binding>,
    once: Vec<OnceListener>,
    diagnostics: Vec<Diagnostic>,
}

impl<H: Host> Engine<H> {
    /// Create an engine with the default grammar and the built-in actions.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            grammar: Grammar::default(),
            script_types: DEFAULT_SCRIPT_TYPES.iter().map(|&t| t.to_owned()).collect(),
            registry: ActionRegistry::with_builtins(),
            directives: Vec::new(),
            bindings: Vec::new(),
            once: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Use different separator phrases.
    #[must_use]
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Set the script content types holding directives.
    #[must_use]
    pub fn with_script_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the action registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register an action.
    #[must_use]
    pub fn with_action<A: Action + 'static>(mut self, name: impl Into<String>, action: A) -> Self {
        self.registry.register(name, action);
        self
    }

    /// Enable an optional module.
    #[must_use]
    pub fn with_module(mut self, module: &dyn Module) -> Self {
        self.enable_module(module);
        self
    }

    /// Install a module's actions and inject its assets into the page.
    pub fn enable_module(&mut self, module: &dyn Module) {
        info!(module = module.name(), "enabling module");
        module.install(&mut self.registry, &mut self.host);
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Registry for adding actions after construction.
    ///
    /// Actions registered here are picked up by every later dispatch,
    /// including directives that were bound earlier.
    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    /// Parse and bind every directive script block of the page.
    ///
    /// Returns the number of directives added. Each call is a fresh pass over
    /// the page; directives bound by earlier passes are kept, so calling this
    /// twice binds everything twice.
    pub fn parse_scripts(&mut self) -> usize {
        let blocks: Vec<String> = self
            .script_types
            .iter()
            .flat_map(|ty| self.host.script_blocks(ty))
            .collect();
        debug!(blocks = blocks.len(), "found directive blocks");
        self.parse_lines(source_lines(blocks))
    }

    /// Parse and bind directives from raw text, one per line.
    ///
    /// Returns the number of directives added.
    pub fn parse_source(&mut self, source: &str) -> usize {
        self.parse_lines(source_lines([source]))
    }

    fn parse_lines(&mut self, lines: Vec<String>) -> usize {
        let first_index = self.directives.len();

        for line in &lines {
            match resolve(line, &self.grammar, &self.host) {
                Ok(Some(directive)) => self.directives.push(directive),
                Ok(None) => {}
                Err(diagnostic) => report(&mut self.diagnostics, diagnostic),
            }
        }

        let added = self.directives.len() - first_index;
        info!(lines = lines.len(), directives = added, "parsed directives");

        let mut dispatcher = Dispatcher {
            registry: &self.registry,
            conjunction: &self.grammar.conjunction,
            host: &mut self.host,
            once: &mut self.once,
            diagnostics: &mut self.diagnostics,
        };
        observe(
            &self.directives[first_index..],
            first_index,
            &mut self.bindings,
            &mut dispatcher,
        );

        added
    }

    /// Report an interaction event on `node`.
    ///
    /// The event bubbles from `node` up through its ancestors. At each
    /// element, pending one-shot listeners run first, then every directive
    /// bound to that element and event, in binding order, with that element
    /// as origin. Returns the number of directives dispatched.
    pub fn fire(&mut self, node: NodeId, event: &str) -> usize {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.host.parent(current) {
            path.push(parent);
            current = parent;
        }

        let mut dispatched = 0;
        for target in path {
            self.run_once_listeners(target, event);

            let bound: Vec<usize> = self
                .bindings
                .iter()
                .filter(|b| b.node == target && b.event == event)
                .map(|b| b.directive)
                .collect();

            for index in bound {
                let mut dispatcher = Dispatcher {
                    registry: &self.registry,
                    conjunction: &self.grammar.conjunction,
                    host: &mut self.host,
                    once: &mut self.once,
                    diagnostics: &mut self.diagnostics,
                };
                dispatcher.dispatch(&self.directives[index], &[target]);
                dispatched += 1;
            }
        }

        debug!(event, dispatched, "fired event");
        dispatched
    }

    fn run_once_listeners(&mut self, node: NodeId, event: &str) {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.once)
            .into_iter()
            .partition(|l| l.node == node && l.events.iter().any(|e| e == event));
        self.once = pending;

        for listener in due {
            (listener.effect)(&mut self.host);
        }
    }

    /// Directives bound so far, in source order.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Events with a directive bound on `node`.
    pub fn listeners(&self, node: NodeId) -> Vec<&str> {
        self.bindings
            .iter()
            .filter(|b| b.node == node)
            .map(|b| b.event.as_str())
            .collect()
    }

    /// Elements the directive at `index` in [`directives`](Self::directives)
    /// listens on, with the event for each.
    pub fn listeners_of(&self, index: usize) -> Vec<(NodeId, &str)> {
        self.bindings
            .iter()
            .filter(|b| b.directive == index)
            .map(|b| (b.node, b.event.as_str()))
            .collect()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take and clear the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
