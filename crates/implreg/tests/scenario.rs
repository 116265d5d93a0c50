use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use implreg::{ImplementationRegistry, LoadError, ResolverConfig, RestrictionType, TypeCatalog, TypeHandle};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Counts `WARN` events emitted while installed.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
	fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

impl<S: Subscriber> Layer<S> for WarnCounter {
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		if *event.metadata().level() == Level::WARN {
			self.0.fetch_add(1, Ordering::SeqCst);
		}
	}
}

fn with_warn_counter<T>(f: impl FnOnce() -> T) -> (T, usize) {
	let counter = WarnCounter::default();
	let subscriber = tracing_subscriber::registry().with(counter.clone());
	let out = tracing::subscriber::with_default(subscriber, f);
	(out, counter.count())
}

fn algorithm() -> RestrictionType {
	RestrictionType::new("algo", "Algorithm")
}

#[test]
fn algorithm_scenario() {
	let algo = algorithm();
	let kmeans = TypeHandle::builder("algo.KMeans").implements(&algo).build();
	let knn_factory = TypeHandle::builder("algo.KNNFactory").implements(&algo).build();

	let mut catalog = TypeCatalog::new();
	catalog.insert_as("algo.kmeans", kmeans.clone());
	catalog.insert_as("algo.knn$Factory", knn_factory.clone());

	let mut registry = ImplementationRegistry::new(catalog);
	registry.register_name(&algo, "kmeans");
	registry.register_name(&algo, "knn");

	assert_eq!(registry.find_implementation(&algo, "kmeans"), Some(kmeans.clone()));
	assert_eq!(registry.find_implementation(&algo, "knn"), Some(knn_factory.clone()));
	assert_eq!(registry.find_implementation(&algo, "dbscan"), None);
	assert!(registry.contains(&algo));
	assert_eq!(registry.find_all_implementations(&algo), [kmeans, knn_factory]);
}

#[test]
fn unassignable_candidate_warns_exactly_once() {
	let algo = algorithm();
	let distance = RestrictionType::new("algo.distance", "Distance");
	let euclidean = TypeHandle::builder("algo.distance.Euclidean").implements(&distance).build();
	let loads = Arc::new(AtomicUsize::new(0));

	let loader = {
		let loads = Arc::clone(&loads);
		let catalog = TypeCatalog::new().with(euclidean);
		move |name: &str| {
			loads.fetch_add(1, Ordering::SeqCst);
			implreg::TypeLoader::load(&catalog, name)
		}
	};
	let mut registry = ImplementationRegistry::new(loader);
	registry.register_name(&algo, "algo.distance.Euclidean");

	let (found, warnings) = with_warn_counter(|| {
		let first = registry.find_implementation(&algo, "algo.distance.Euclidean");
		let loads_after_first = loads.load(Ordering::SeqCst);
		let second = registry.find_implementation(&algo, "algo.distance.Euclidean");
		let all = registry.find_all_implementations(&algo);
		assert_eq!(loads.load(Ordering::SeqCst), loads_after_first, "failed slot was retried");
		(first, second, all)
	});

	assert_eq!(found, (None, None, Vec::new()));
	assert_eq!(warnings, 1);
}

#[test]
fn failed_registered_load_is_warned_by_find_all() {
	let algo = algorithm();
	let loader = |name: &str| -> Result<TypeHandle, LoadError> {
		Err(LoadError::Failed {
			name: name.to_owned(),
			reason: "missing symbol".into(),
		})
	};
	let mut registry = ImplementationRegistry::new(loader);
	registry.register_name(&algo, "algo.Broken");

	let (first, warnings) = with_warn_counter(|| registry.find_all_implementations(&algo));
	assert!(first.is_empty());
	assert_eq!(warnings, 1);

	let (second, warnings) = with_warn_counter(|| registry.find_all_implementations(&algo));
	assert!(second.is_empty());
	assert_eq!(warnings, 0, "pinned slots are not reloaded");
}

#[test]
fn speculative_misses_are_silent() {
	let algo = algorithm();
	let registry = ImplementationRegistry::new(TypeCatalog::new());

	let (found, warnings) = with_warn_counter(|| registry.find_implementation(&algo, "dbscan"));
	assert_eq!(found, None);
	assert_eq!(warnings, 0);
}

#[test]
fn alias_cycle_warns_once() {
	let algo = algorithm();
	let config = ResolverConfig::from_toml_str("max_alias_depth = 4").expect("valid config");
	let mut registry = ImplementationRegistry::with_config(TypeCatalog::new(), config);
	registry.register_name(&algo, "ping");
	registry.register_alias(&algo, "ping", "pong");
	registry.register_alias(&algo, "pong", "ping");

	let (found, warnings) = with_warn_counter(|| registry.find_implementation(&algo, "PING"));
	assert_eq!(found, None);
	assert_eq!(warnings, 1);
}
