/// The kind of lexical element the reader last produced (spec §3 "JSON Token").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonTokenKind {
    None,
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    PropertyName,
    String,
    Number,
    True,
    False,
    Null,
}

impl JsonTokenKind {
    pub const fn is_value_start(self) -> bool {
        matches!(
            self,
            JsonTokenKind::BeginObject
                | JsonTokenKind::BeginArray
                | JsonTokenKind::String
                | JsonTokenKind::Number
                | JsonTokenKind::True
                | JsonTokenKind::False
                | JsonTokenKind::Null
        )
    }

    pub const fn is_container_start(self) -> bool {
        matches!(self, JsonTokenKind::BeginObject | JsonTokenKind::BeginArray)
    }
}

/// A single token: its kind plus the raw source bytes that produced it.
///
/// For `String` and `PropertyName`, `slice` has the surrounding quotes
/// stripped but escape sequences are **not** decoded (spec §3) — it is the
/// raw lexical form, exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonToken<'a> {
    pub kind: JsonTokenKind,
    pub slice: &'a [u8],
}

impl<'a> JsonToken<'a> {
    pub const NONE: JsonToken<'static> = JsonToken {
        kind: JsonTokenKind::None,
        slice: &[],
    };

    pub const fn new(kind: JsonTokenKind, slice: &'a [u8]) -> Self {
        JsonToken { kind, slice }
    }

    /// The raw (undecoded) text of a `String`/`PropertyName`/`Number` token,
    /// or the matched literal for `True`/`False`/`Null`/structural tokens.
    pub const fn slice(&self) -> &'a [u8] {
        self.slice
    }
}
