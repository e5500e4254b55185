//! Integration tests for the provider registry, dispatcher, loader and
//! resampler working together.

mod common;

use common::{write_text_fixture, MockCube, MockProvider};
use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use stax::{
    get_file_structure, load, save, Action, CoordArray, DataType, ImageStack, LoadOutcome,
    Registry, Selection,
};

/// Shared fixture directory holding one pre-written text stack
static FIXTURE: Lazy<(TempDir, PathBuf, ImageStack)> = Lazy::new(|| {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("beamtime_scan.txt");
    let stack = write_text_fixture(&path, 4, 5, 3);
    (dir, path, stack)
});

fn stitch_registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(Box::new(
        MockProvider::new("Mock HDF5", vec!["*.hdf5"], true)
            .whole_file(MockCube::new(3, 4, 2, 1.5))
            .entry("region1", MockCube::new(2, 3, 2, 1.0))
            .entry("region2", MockCube::new(4, 5, 2, 2.0)),
    ));
    registry
}

#[test]
fn identify_prefers_first_confirming_claimant() {
    let mut registry = Registry::new();
    registry.register(Box::new(MockProvider::new("Exchange", vec!["*.hdf5"], false)));
    registry.register(Box::new(MockProvider::new("Nexus", vec!["*.hdf5"], true)));

    let provider = registry.identify(Path::new("scan.hdf5")).unwrap();
    assert_eq!(provider.title(), "Nexus");
}

#[test]
fn identify_returns_none_without_extension_match() {
    let registry = stitch_registry();
    assert!(registry.identify(Path::new("scan.zzz")).is_none());
}

#[test]
fn load_yields_no_provider_for_unsupported_files() {
    let registry = stitch_registry();
    let mut stack = ImageStack::new();

    let outcome = load(
        &registry,
        Path::new("scan.zzz"),
        &mut stack,
        None,
        None,
        None,
    )
    .unwrap();

    assert_eq!(outcome, LoadOutcome::NoProvider);
    assert!(stack.is_empty());
    assert!(stack.interpolated.is_none());
}

#[test]
fn load_whole_file_populates_and_resamples() {
    let registry = stitch_registry();
    let mut stack = ImageStack::new();

    let outcome = load(
        &registry,
        Path::new("scan.hdf5"),
        &mut stack,
        None,
        None,
        None,
    )
    .unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            provider: "Mock HDF5".to_string()
        }
    );
    assert_eq!(stack.absdata.dim(), (3, 4, 2));

    // Index coordinates are already uniform, so nearest-neighbor
    // resampling onto the instrument grid reproduces the cube
    let interpolated = stack.interpolated.as_ref().unwrap();
    assert_eq!(interpolated, &stack.absdata);
}

#[test]
fn load_single_selection_reads_that_entry() {
    let registry = stitch_registry();
    let mut stack = ImageStack::new();

    let selection = vec![Selection::new("region2")];
    load(
        &registry,
        Path::new("scan.hdf5"),
        &mut stack,
        None,
        Some(&selection),
        None,
    )
    .unwrap();

    assert_eq!(stack.absdata.dim(), (4, 5, 2));
    assert!(stack.absdata.iter().all(|&v| v == 2.0));
}

#[test]
fn load_multi_selection_stitches_with_zero_padding() {
    let registry = stitch_registry();
    let mut stack = ImageStack::new();

    // region1 is (2,3,2) filled with 1.0, region2 is (4,5,2) filled with 2.0
    let selection = vec![Selection::new("region1"), Selection::new("region2")];
    load(
        &registry,
        Path::new("scan.hdf5"),
        &mut stack,
        None,
        Some(&selection),
        None,
    )
    .unwrap();

    assert_eq!(stack.absdata.dim(), (6, 5, 2));

    // First cube's rows keep their data, trailing columns zero-padded
    for r in 0..2 {
        for s in 0..2 {
            for c in 0..3 {
                assert_eq!(stack.absdata[[r, c, s]], 1.0);
            }
            for c in 3..5 {
                assert_eq!(stack.absdata[[r, c, s]], 0.0);
            }
        }
    }
    // Second cube appended intact
    for r in 2..6 {
        for c in 0..5 {
            for s in 0..2 {
                assert_eq!(stack.absdata[[r, c, s]], 2.0);
            }
        }
    }

    // Stitched coordinates are re-indexed integer sequences
    assert_eq!(stack.x_dist, Some(CoordArray::indices(6)));
    assert_eq!(stack.y_dist, Some(CoordArray::indices(5)));

    // The merged cube was still projected onto the instrument grid
    assert!(stack.interpolated.is_some());
    assert_eq!(stack.interpolated.as_ref().unwrap().dim(), (6, 5, 2));
}

#[test]
fn load_surfaces_provider_errors_unmodified() {
    let registry = stitch_registry();
    let mut stack = ImageStack::new();

    let selection = vec![Selection::new("missing_region")];
    let result = load(
        &registry,
        Path::new("scan.hdf5"),
        &mut stack,
        None,
        Some(&selection),
        None,
    );

    match result.unwrap_err() {
        stax::StaxError::Provider { provider, message } => {
            assert_eq!(provider, "Mock HDF5");
            assert!(message.contains("missing_region"));
        }
        e => panic!("Expected provider error, got {:?}", e),
    }
}

#[test]
fn builtin_text_provider_round_trip() {
    let (_dir, path, written) = &*FIXTURE;
    let registry = Registry::with_builtin_providers();

    // Single dataset: no structure to choose from
    assert!(get_file_structure(&registry, path, None).unwrap().is_none());

    let mut stack = ImageStack::new();
    let outcome = load(&registry, path, &mut stack, None, None, None).unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            provider: "Plain Text Stack".to_string()
        }
    );
    assert_eq!(stack.absdata, written.absdata);
    assert_eq!(stack.ev, written.ev);

    // Uniform index coordinates: resampling is the identity
    assert_eq!(stack.interpolated.as_ref().unwrap(), &stack.absdata);
}

#[test]
fn save_then_reload_preserves_the_cube() {
    let (_dir, path, _) = &*FIXTURE;
    let registry = Registry::with_builtin_providers();
    let provider = registry.provider_by_title("Plain Text Stack").unwrap();

    let mut stack = ImageStack::new();
    load(&registry, path, &mut stack, None, None, None).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("copy.txt");
    save(&out_path, &stack, DataType::Stack, provider).unwrap();

    let mut reloaded = ImageStack::new();
    load(&registry, &out_path, &mut reloaded, None, None, None).unwrap();
    assert_eq!(reloaded.absdata, stack.absdata);
}

#[test]
fn read_filter_list_has_aggregate_and_catch_all_entries() {
    let registry = Registry::with_builtin_providers();

    let filters = registry.filter_list(Action::Read, DataType::Stack);
    assert_eq!(filters.first().unwrap(), "Supported Formats (*.txt *.dat)");
    assert_eq!(
        filters.get(1).unwrap(),
        "Plain Text Stack (*.txt *.dat)"
    );
    assert_eq!(filters.last().unwrap(), "All files (*.*)");
}

#[test]
fn explicit_provider_skips_dispatch() {
    let registry = stitch_registry();
    let provider = registry.provider_by_title("Mock HDF5").unwrap();
    let mut stack = ImageStack::new();

    // Extension matches nothing, but the explicit provider is used anyway
    let outcome = load(
        &registry,
        Path::new("scan.zzz"),
        &mut stack,
        Some(provider),
        None,
        None,
    )
    .unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Loaded {
            provider: "Mock HDF5".to_string()
        }
    );
    assert_eq!(stack.absdata.dim(), (3, 4, 2));
}
