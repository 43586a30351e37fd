use thiserror::Error;

/// Hard cap on destination entry fields, origin excluded.
pub const MAX_DESTINATION_FIELDS: usize = 9;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("a route requires an origin and at least one destination")]
    MissingInput,
}

/// The destination entry form: one origin field and a bounded list of
/// destination fields. Mirrors the entry widget of the original app:
/// between one and nine destination fields always exist, and removing
/// the last remaining field blanks it instead of deleting it.
#[derive(Debug, Clone)]
pub struct DestinationForm {
    origin: String,
    fields: Vec<String>,
}

impl Default for DestinationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DestinationForm {
    pub fn new() -> Self {
        Self {
            origin: String::new(),
            fields: vec![String::new()],
        }
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = origin.into();
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Appends an empty destination field. No-op once the cap is
    /// reached; returns whether a field was added.
    pub fn add_field(&mut self) -> bool {
        if self.fields.len() >= MAX_DESTINATION_FIELDS {
            return false;
        }
        self.fields.push(String::new());
        true
    }

    pub fn set_field(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            *field = value.into();
        }
    }

    /// Adds a field and fills it in one step. Returns false (and drops
    /// the value) once the cap is reached.
    pub fn push_destination(&mut self, value: impl Into<String>) -> bool {
        // reuse the initial blank field before growing the list
        if self.fields.len() == 1 && self.fields[0].is_empty() {
            self.fields[0] = value.into();
            return true;
        }

        if !self.add_field() {
            return false;
        }
        let last = self.fields.len() - 1;
        self.fields[last] = value.into();
        true
    }

    /// Removes the last destination field. The sole remaining field is
    /// never removed, only blanked.
    pub fn remove_field(&mut self) {
        if self.fields.len() > 1 {
            self.fields.pop();
        } else {
            self.fields[0].clear();
        }
    }

    /// Blanks every destination field without changing the count.
    pub fn clear_fields(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }

    /// Validates the form and produces the round-trip stop list:
    /// origin, each non-empty destination in field order, origin
    /// again. Fails without touching the network when the origin is
    /// empty or every destination field is blank.
    pub fn submit(&self) -> Result<Itinerary, ValidationError> {
        let destinations: Vec<&String> =
            self.fields.iter().filter(|field| !field.is_empty()).collect();

        if self.origin.is_empty() || destinations.is_empty() {
            return Err(ValidationError::MissingInput);
        }

        let mut stops = Vec::with_capacity(destinations.len() + 2);
        stops.push(self.origin.clone());
        stops.extend(destinations.into_iter().cloned());
        stops.push(self.origin.clone());

        Ok(Itinerary { stops })
    }
}

/// A validated round-trip stop list. The first and last stops are the
/// same origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    stops: Vec<String>,
}

impl Itinerary {
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Stops with the duplicated trailing origin removed; this is what
    /// matrix and solver calls operate on.
    pub fn unique_stops(&self) -> &[String] {
        &self.stops[..self.stops.len() - 1]
    }
}
