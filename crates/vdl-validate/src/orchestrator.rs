//! Runs the nine validators in the fixed order the checks depend on
//! (type/enum resolution before anything that reads resolved links;
//! constants before enums, since constants re-derive enum value types
//! independently — see `validators::constants`).

use vdl_diagnostic::{CancellationToken, Diagnostic};
use vdl_symbol::SymbolTable;

use crate::validators;

pub fn validate(table: &mut SymbolTable, token: &CancellationToken) -> Option<Vec<Diagnostic>> {
    let mut diags = Vec::new();

    macro_rules! checkpoint {
        () => {
            if token.is_cancelled() {
                return None;
            }
        };
    }

    checkpoint!();
    diags.extend(validators::naming::run(table));

    checkpoint!();
    diags.extend(validators::types::run(table));

    checkpoint!();
    diags.extend(validators::constants::run(table));

    checkpoint!();
    diags.extend(validators::spreads::run(table));

    checkpoint!();
    diags.extend(validators::enums::run(table));

    checkpoint!();
    diags.extend(validators::cycles::run(table));

    checkpoint!();
    diags.extend(validators::structure::run(table));

    checkpoint!();
    diags.extend(validators::global_uniqueness::run(table));

    checkpoint!();
    diags.extend(validators::synthetic_names::run(table));

    Some(diags)
}
