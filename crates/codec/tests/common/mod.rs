#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use seqlink_codec::{
    AdvancedOptions, BatchState, CellType, ColumnCatalog, GeneState, GeneSymbol, Pam,
    ShareState, SingleState, SortDirection, TableView, BASES,
};

pub fn random_sequence(rng: &mut StdRng, max_len: usize) -> String {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| BASES[rng.gen_range(0..4)] as char)
        .collect()
}

fn random_index(rng: &mut StdRng) -> Option<usize> {
    if rng.gen_bool(0.3) {
        None
    } else {
        Some(rng.gen_range(0..100_000))
    }
}

fn random_pam(rng: &mut StdRng) -> Pam {
    loop {
        let len = rng.gen_range(2..=6);
        let pam: String = (0..len)
            .map(|_| *b"ACGTRYSWKMBDHVN".choose(rng).unwrap() as char)
            .collect();
        if let Ok(pam) = Pam::new(pam) {
            return pam;
        }
    }
}

fn random_gene(rng: &mut StdRng) -> GeneSymbol {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.-";
    loop {
        let len = rng.gen_range(1..=12);
        let gene: String = (0..len)
            .map(|_| *CHARS.choose(rng).unwrap() as char)
            .collect();
        if let Ok(gene) = GeneSymbol::new(gene) {
            return gene;
        }
    }
}

fn random_advanced(rng: &mut StdRng) -> AdvancedOptions {
    AdvancedOptions {
        enabled: rng.gen(),
        match_sequence: random_sequence(rng, 60),
        point_of_interest: random_index(rng),
        deletion_start: random_index(rng),
        deletion_end: random_index(rng),
    }
}

fn random_table(rng: &mut StdRng, catalog: &ColumnCatalog, advanced: bool) -> TableView {
    let universe = catalog.universe(advanced);
    let chosen_columns = universe
        .names()
        .iter()
        .filter(|_| rng.gen_bool(0.5))
        .cloned()
        .collect();
    let sort_column = if rng.gen_bool(0.25) {
        None
    } else {
        universe.names().choose(rng).cloned()
    };
    TableView {
        chosen_columns,
        sort_column,
        sort_direction: SortDirection::from_ascending(rng.gen()),
        selected_row: random_index(rng),
    }
}

pub fn random_single(rng: &mut StdRng) -> SingleState {
    let sequence = random_sequence(rng, 400);
    let cutsite = rng.gen_range(0..=sequence.len());
    SingleState {
        celltype: *CellType::ALL.choose(rng).unwrap(),
        sequence,
        cutsite,
    }
}

pub fn random_batch(rng: &mut StdRng) -> BatchState {
    let advanced = random_advanced(rng);
    let table = random_table(rng, &ColumnCatalog::batch(), advanced.enabled);
    BatchState {
        sequence: random_sequence(rng, 5000),
        pam: random_pam(rng),
        advanced,
        table,
    }
}

pub fn random_gene_state(rng: &mut StdRng) -> GeneState {
    let advanced = random_advanced(rng);
    let table = random_table(rng, &ColumnCatalog::gene(), advanced.enabled);
    GeneState {
        celltype: *CellType::ALL.choose(rng).unwrap(),
        gene: random_gene(rng),
        pam: random_pam(rng),
        advanced,
        table,
    }
}

pub fn random_state(rng: &mut StdRng) -> ShareState {
    match rng.gen_range(0..3) {
        0 => random_single(rng).into(),
        1 => random_batch(rng).into(),
        _ => random_gene_state(rng).into(),
    }
}
