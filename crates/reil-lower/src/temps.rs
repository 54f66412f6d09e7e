use indexmap::IndexMap;

/// Allocates REIL temporary slots.
///
/// Two kinds of demand meet here. Source temporaries coming out of the
/// lifter keep their slot for the whole block: the first occurrence of a
/// name reserves an index, later occurrences resolve to the same one.
/// Synthesized temporaries, created to hold flattening results, restart
/// from index zero at every statement and skip over any index the alias
/// table has reserved. A synthesized name is therefore unique only within
/// the statement that produced it, never across the block.
#[derive(Debug, Default, Clone)]
pub struct TempAllocator {
    aliases: IndexMap<String, u32>,
    next: u32,
}

/// Canonical name of a REIL temporary slot.
pub fn reil_name(index: u32) -> String {
    format!("V_{:02}", index)
}

/// True for names already in canonical `V_NN` form; those pass through
/// conversion without re-allocation.
pub fn is_reil_name(name: &str) -> bool {
    match name.strip_prefix("V_") {
        Some(rest) => !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

impl TempAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all block-scoped state. Called once per basic block.
    pub fn reset(&mut self) {
        self.aliases.clear();
        self.next = 0;
    }

    /// Restarts the synthesized-index counter. Called once per statement;
    /// the alias table survives.
    pub fn begin_statement(&mut self) {
        self.next = 0;
    }

    /// Resolves a source temporary name to its REIL slot, reserving a
    /// fresh one on first sight.
    pub fn resolve(&mut self, name: &str) -> u32 {
        if let Some(&index) = self.aliases.get(name) {
            return index;
        }
        let index = self.fresh();
        self.aliases.insert(name.to_string(), index);
        index
    }

    /// Next free index that no source temporary has reserved.
    pub fn fresh(&mut self) -> u32 {
        loop {
            let index = self.next;
            self.next += 1;
            if !self.aliases.values().any(|&reserved| reserved == index) {
                return index;
            }
        }
    }

    pub fn fresh_name(&mut self) -> String {
        reil_name(self.fresh())
    }

    pub fn reserved(&self) -> usize {
        self.aliases.len()
    }
}
