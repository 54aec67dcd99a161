//! Per-run registry of deterministic value generators.
//!
//! The registry is built once from the full benchmark tree and is
//! read-only afterwards: the map itself is never mutated, and each
//! generator sits behind its own mutex so concurrent compilations can
//! draw values without external locking.

use crate::error::RegistryError;
use sqlbench_core::{BenchmarkDescriptor, QueryDescriptor, WorkloadUnit};
use sqlbench_generator::ValueGenerator;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// Identity of one generator: the step, query, and parameter it serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratorKey {
    /// Owning step name
    pub step: String,
    /// Owning query name
    pub query: String,
    /// Parameter name
    pub param: String,
}

impl GeneratorKey {
    /// Build a key from its parts.
    pub fn new(
        step: impl Into<String>,
        query: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            step: step.into(),
            query: query.into(),
            param: param.into(),
        }
    }
}

impl fmt::Display for GeneratorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.step, self.query, self.param)
    }
}

/// Registry holding one generator per declared query parameter.
#[derive(Debug)]
pub struct GeneratorRegistry {
    generators: HashMap<GeneratorKey, Mutex<ValueGenerator>>,
}

impl GeneratorRegistry {
    /// Build the registry for a whole run.
    ///
    /// Walks every step, every unit, and every query - including queries
    /// nested inside transactions - and constructs one generator per
    /// declared parameter, seeded from the run seed and the query's
    /// repetition count. A malformed rule or a duplicate key fails the
    /// build; keys are never overwritten silently.
    pub fn build(seed: u64, benchmark: &BenchmarkDescriptor) -> Result<Self, RegistryError> {
        let mut generators = HashMap::new();

        for step in &benchmark.steps {
            for unit in &step.units {
                match unit {
                    WorkloadUnit::Table(_) => {}
                    WorkloadUnit::Query(query) => {
                        collect_query_generators(&mut generators, seed, &step.name, query)?;
                    }
                    WorkloadUnit::Transaction(tx) => {
                        for query in &tx.queries {
                            collect_query_generators(&mut generators, seed, &step.name, query)?;
                        }
                    }
                }
            }
        }

        tracing::debug!(generators = generators.len(), "built generator registry");

        Ok(Self { generators })
    }

    /// Look up the generator for a key.
    ///
    /// Returns the generator behind its mutex; callers lock it just long
    /// enough to draw one value. Safe under concurrent callers.
    pub fn lookup(&self, key: &GeneratorKey) -> Option<&Mutex<ValueGenerator>> {
        self.generators.get(key)
    }

    /// Number of registered generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the registry holds no generators.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

fn collect_query_generators(
    generators: &mut HashMap<GeneratorKey, Mutex<ValueGenerator>>,
    seed: u64,
    step: &str,
    query: &QueryDescriptor,
) -> Result<(), RegistryError> {
    for param in &query.params {
        let key = GeneratorKey::new(step, &query.name, &param.name);

        let generator = ValueGenerator::new(seed, query.count, &param.generator)
            .map_err(|source| RegistryError::Rule {
                key: key.clone(),
                source,
            })?;

        match generators.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(Mutex::new(generator));
            }
            Entry::Occupied(entry) => {
                return Err(RegistryError::DuplicateGenerator(entry.key().clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlbench_core::{
        GenerationRule, ParamDescriptor, StepDescriptor, TransactionDescriptor, Value,
    };

    fn query(name: &str, params: Vec<&str>) -> QueryDescriptor {
        QueryDescriptor {
            name: name.to_string(),
            sql: String::new(),
            params: params
                .into_iter()
                .map(|p| ParamDescriptor {
                    name: p.to_string(),
                    generator: GenerationRule::Sequential { start: 0 },
                })
                .collect(),
            count: 1,
        }
    }

    fn benchmark(units: Vec<WorkloadUnit>) -> BenchmarkDescriptor {
        BenchmarkDescriptor {
            steps: vec![StepDescriptor {
                name: "step".to_string(),
                units,
            }],
        }
    }

    #[test]
    fn test_build_collects_query_params() {
        let tree = benchmark(vec![WorkloadUnit::Query(query("q1", vec!["a", "b"]))]);
        let registry = GeneratorRegistry::build(42, &tree).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry
            .lookup(&GeneratorKey::new("step", "q1", "a"))
            .is_some());
        assert!(registry
            .lookup(&GeneratorKey::new("step", "q1", "missing"))
            .is_none());
    }

    #[test]
    fn test_build_collects_transaction_nested_params() {
        let tree = benchmark(vec![WorkloadUnit::Transaction(TransactionDescriptor {
            name: "t1".to_string(),
            isolation: Default::default(),
            queries: vec![query("q1", vec!["a"]), query("q2", vec!["b"])],
        })]);
        let registry = GeneratorRegistry::build(42, &tree).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry
            .lookup(&GeneratorKey::new("step", "q2", "b"))
            .is_some());
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let tree = benchmark(vec![
            WorkloadUnit::Query(query("q1", vec!["a"])),
            WorkloadUnit::Query(query("q1", vec!["a"])),
        ]);

        assert!(matches!(
            GeneratorRegistry::build(42, &tree),
            Err(RegistryError::DuplicateGenerator(_))
        ));
    }

    #[test]
    fn test_malformed_rule_fails_build() {
        let mut q = query("q1", vec![]);
        q.params.push(ParamDescriptor {
            name: "bad".to_string(),
            generator: GenerationRule::IntRange { min: 10, max: 1 },
        });
        let tree = benchmark(vec![WorkloadUnit::Query(q)]);

        assert!(matches!(
            GeneratorRegistry::build(42, &tree),
            Err(RegistryError::Rule { .. })
        ));
    }

    #[test]
    fn test_lookup_draws_values() {
        let tree = benchmark(vec![WorkloadUnit::Query(query("q1", vec!["a"]))]);
        let registry = GeneratorRegistry::build(42, &tree).unwrap();

        let generator = registry
            .lookup(&GeneratorKey::new("step", "q1", "a"))
            .unwrap();
        let value = generator.lock().unwrap().next_value().unwrap();
        assert_eq!(value, Value::Int64(0));
    }

    #[test]
    fn test_key_display() {
        let key = GeneratorKey::new("s", "q", "p");
        assert_eq!(key.to_string(), "s:q:p");
    }
}
