//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mindboard_core` linkage.
//! - Build one template mind map end-to-end and optionally write its
//!   snapshot to the path given as the first argument.

use mindboard_core::{
    create_mind_map, export_to_json, templates, BoardRegistry, MindMapConfig,
};

fn main() {
    println!("mindboard_core version={}", mindboard_core::core_version());

    let mut registry = BoardRegistry::new();
    let board_id = registry.create_board();
    let Some(mut store) = registry.checkout_board(board_id) else {
        eprintln!("error: freshly created board is missing from the registry");
        std::process::exit(1);
    };

    let template = &templates()[0];
    let delta = create_mind_map(&MindMapConfig {
        center_x: 400.0,
        center_y: 300.0,
        topic: template.topic.to_string(),
        subtopics: template.subtopics.iter().map(|s| s.to_string()).collect(),
    });
    if !store.extend(delta) {
        eprintln!("error: generated mind map was rejected by the store");
        std::process::exit(1);
    }

    let board = store.into_board();
    println!(
        "demo board `{}` nodes={} edges={}",
        board.title,
        board.nodes.len(),
        board.edges.len()
    );

    let snapshot = match export_to_json(&board) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            eprintln!("error: snapshot export failed: {err}");
            std::process::exit(1);
        }
    };
    registry.commit_board(board);

    if let Some(path) = std::env::args().nth(1) {
        if let Err(err) = std::fs::write(&path, snapshot) {
            eprintln!("error: failed to write snapshot to {path}: {err}");
            std::process::exit(1);
        }
        println!("snapshot written to {path}");
    } else {
        println!("snapshot bytes={}", snapshot.len());
    }
}
