/// Tags destination lookups so only the newest one may write its results.
///
/// Responses can resolve in any order. Each issued ticket carries a generation; a
/// result is applied only while its ticket is still the latest one issued.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    destination: String,
}

impl LookupTicket {
    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl RequestSequencer {
    /// Issue a ticket for `destination`; every earlier ticket goes stale.
    pub fn issue(&mut self, destination: &str) -> LookupTicket {
        self.generation += 1;
        LookupTicket { generation: self.generation, destination: destination.to_string() }
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.generation
    }
}
