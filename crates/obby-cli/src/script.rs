use std::fmt;

/// Whether a directive presses or releases its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// One timeline line: press or release `code` before frame `frame` is simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub frame: u64,
    pub edge: KeyEdge,
    pub code: String,
}

/// Parse failure with the 1-based line it occurred on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Key presses ordered by frame. Directives on the same frame keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    directives: Vec<Directive>,
    cursor: usize,
}

impl Timeline {
    /// Parse `<frame> down|up <code>` lines. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut directives = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let error = |message: String| ScriptError {
                line: index + 1,
                message,
            };

            let mut parts = line.split_whitespace();
            let (Some(frame), Some(edge), Some(code), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(error(format!("expected '<frame> down|up <code>', got '{line}'")));
            };
            let frame = frame
                .parse::<u64>()
                .map_err(|e| error(format!("bad frame '{frame}': {e}")))?;
            let edge = match edge.to_ascii_lowercase().as_str() {
                "down" => KeyEdge::Down,
                "up" => KeyEdge::Up,
                other => return Err(error(format!("unknown edge '{other}'"))),
            };
            directives.push(Directive {
                frame,
                edge,
                code: code.to_string(),
            });
        }
        directives.sort_by_key(|d| d.frame);
        Ok(Self {
            directives,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Directives scheduled at or before `frame` that have not been taken yet.
    pub fn take_due(&mut self, frame: u64) -> &[Directive] {
        let start = self.cursor;
        while self
            .directives
            .get(self.cursor)
            .is_some_and(|d| d.frame <= frame)
        {
            self.cursor += 1;
        }
        &self.directives[start..self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directives_and_comments() {
        let timeline = Timeline::parse(
            "# hold right, then jump\n\
             0 down KeyD\n\
             \n\
             40 down Space   # over the lava\n\
             41 UP Space\n",
        )
        .unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(
            timeline.directives[1],
            Directive {
                frame: 40,
                edge: KeyEdge::Down,
                code: "Space".to_string()
            }
        );
        assert_eq!(timeline.directives[2].edge, KeyEdge::Up);
    }

    #[test]
    fn sorted_by_frame_keeping_file_order() {
        let timeline = Timeline::parse("10 up KeyD\n5 down KeyA\n10 down KeyW\n").unwrap();
        let order: Vec<_> = timeline
            .directives
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(order, ["KeyA", "KeyD", "KeyW"]);
    }

    #[test]
    fn take_due_yields_each_directive_once() {
        let mut timeline = Timeline::parse("0 down KeyD\n3 down Space\n3 up KeyD\n9 up Space\n")
            .unwrap();
        assert_eq!(timeline.take_due(0).len(), 1);
        assert!(timeline.take_due(1).is_empty());
        assert_eq!(timeline.take_due(5).len(), 2);
        assert!(timeline.take_due(5).is_empty());
        assert_eq!(timeline.take_due(100)[0].code, "Space");
    }

    #[test]
    fn reports_line_numbers() {
        let err = Timeline::parse("0 down KeyD\n\nsoon down Space\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.to_string().starts_with("line 3: bad frame 'soon'"));

        let err = Timeline::parse("1 press KeyD").unwrap_err();
        assert_eq!(err.message, "unknown edge 'press'");

        assert!(Timeline::parse("1 down").is_err());
        assert!(Timeline::parse("1 down KeyD extra").is_err());
    }

    #[test]
    fn empty_script_is_valid() {
        let mut timeline = Timeline::parse("# nothing\n\n").unwrap();
        assert!(timeline.is_empty());
        assert!(timeline.take_due(u64::MAX).is_empty());
    }
}
