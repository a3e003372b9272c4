//! Templated output, in the style of C’s `strftime`.
//!
//! A template is literal text with `%` directives scattered through it.
//! Which directive characters mean something depends on the value being
//! formatted: a Gregorian date knows `%B` (the month name), an ISO date
//! knows `%W` (the week number), a clock time knows `%H` (the hour), and
//! so on. Each of them implements `Directives`, and the rest is shared.
//!
//! - `%%` always renders as a single `%`.
//! - A `%` at the very end of the template renders as a single `%`.
//! - A directive character the value doesn’t know passes through
//!   unchanged, percent sign included.

use std::fmt::Display;
use std::str::CharIndices;

use locale;
use pad::{PadStr, Alignment};


/// Something that can fill in `%` directives.
pub trait Directives {

    /// Returns the text for the given directive character, or `None` if
    /// this value has no such directive.
    fn directive(&self, code: char) -> Option<String>;
}


/// One piece of a parsed template.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Field<'a> {

    /// Text to be copied across as-is.
    Literal(&'a str),

    /// A `%` followed by this character.
    Directive(char),

    /// A `%` that stands for itself: either `%%`, or a trailing `%`.
    Percent,
}

/// A template, parsed into its fields.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Template<'a> {
    pub fields: Vec<Field<'a>>,
}

impl<'a> Template<'a> {

    /// Splits the input into literal text and directives. This never
    /// fails: anything that isn’t a directive is literal text.
    pub fn parse(input: &'a str) -> Template<'a> {
        let mut parser = TemplateParser::new(input);
        parser.parse_template();

        Template { fields: parser.fields }
    }

    /// Fills in the directives from the given source.
    pub fn render<D: Directives + ?Sized>(&self, source: &D) -> String {
        let mut buf = String::new();

        for field in &self.fields {
            match *field {
                Field::Literal(text)   => buf.push_str(text),
                Field::Percent         => buf.push('%'),
                Field::Directive(code) => match source.directive(code) {
                    Some(text) => buf.push_str(&text),
                    None => {
                        buf.push('%');
                        buf.push(code);
                    },
                },
            }
        }

        buf
    }
}

/// Formats a value according to a template.
pub fn cformat<D: Directives + ?Sized>(template: &str, source: &D) -> String {
    Template::parse(template).render(source)
}


struct TemplateParser<'a> {
    iter:   CharIndices<'a>,
    fields: Vec<Field<'a>>,
    input:  &'a str,
    anchor: Option<usize>,
}

impl<'a> TemplateParser<'a> {
    fn new(input: &'a str) -> TemplateParser<'a> {
        TemplateParser {
            iter:   input.char_indices(),
            fields: Vec::new(),
            input,
            anchor: None,
        }
    }

    fn collect_up_to_anchor(&mut self, position: Option<usize>) {
        if let Some(pos) = self.anchor {
            self.anchor = None;
            let text = match position {
                Some(new_pos) => &self.input[pos..new_pos],
                None          => &self.input[pos..],
            };
            self.fields.push(Field::Literal(text));
        }
    }

    fn parse_template(&mut self) {
        loop {
            match self.iter.next() {
                Some((new_pos, '%')) => {
                    self.collect_up_to_anchor(Some(new_pos));

                    let field = match self.iter.next() {
                        Some((_, '%'))  => Field::Percent,
                        Some((_, code)) => Field::Directive(code),
                        None            => Field::Percent,
                    };
                    self.fields.push(field);
                },
                Some((pos, _)) => {
                    if self.anchor.is_none() {
                        self.anchor = Some(pos);
                    }
                },
                None => break,
            }
        }

        // Finally, collect any literal characters after the last
        // directive that haven't been turned into a Literal field yet.
        self.collect_up_to_anchor(None);
    }
}


/// Pads a non-negative number with zeroes up to the given width.
pub(crate) fn zero_padded<N: Display>(number: N, width: usize) -> String {
    number.to_string().pad(width, '0', Alignment::Right, false)
}

/// Renders a year with at least four digits, and a leading `-` if it’s
/// negative: `0042`, `2024`, `-0753`.
pub(crate) fn signed_year(year: i64) -> String {
    if year >= 0 {
        zero_padded(year, 4)
    }
    else {
        format!("-{}", zero_padded(-(year as i128), 4))
    }
}

/// The last two digits of the year, always positive.
pub(crate) fn short_year(year: i64) -> String {
    zero_padded(year.rem_euclid(100), 2)
}

/// Full weekday names, starting from Sunday. The `locale` crate’s English
/// table hands back the short names for both lengths, so these are kept here.
const LONG_DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// The English name of a weekday, where Monday is 1 and Sunday is 7.
pub(crate) fn weekday_name(weekday: u8, long: bool) -> String {
    let from_sunday = (weekday % 7) as usize;

    if long { LONG_DAY_NAMES[from_sunday].to_owned() }
       else { locale::Time::english().short_day_name(from_sunday) }
}

/// The English name of a month, where January is 1.
pub(crate) fn month_name(month: u8, long: bool) -> String {
    let names = locale::Time::english();
    let from_january = (month - 1) as usize;

    if long { names.long_month_name(from_january) }
       else { names.short_month_name(from_january) }
}


#[cfg(test)]
mod test {
    pub(crate) use super::{Template, Directives, cformat};
    pub(crate) use super::Field::*;

    mod parse {
        use super::*;

        macro_rules! test {
            ($name: ident: $input: expr => $result: expr) => {
                #[test]
                fn $name() {
                    assert_eq!(Template::parse($input), Template { fields: $result })
                }
            };
        }

        test!(empty_string: ""              => vec![]);
        test!(entirely_literal: "Date!"     => vec![ Literal("Date!") ]);
        test!(single_directive: "%Y"        => vec![ Directive('Y') ]);
        test!(two_directives: "%Y%m"        => vec![ Directive('Y'), Directive('m') ]);
        test!(surrounded: "(%d)"            => vec![ Literal("("), Directive('d'), Literal(")") ]);
        test!(a_bunch: "%Y-%m-%d"           => vec![ Directive('Y'), Literal("-"), Directive('m'), Literal("-"), Directive('d') ]);
        test!(escaped: "100%%"              => vec![ Literal("100"), Percent ]);
        test!(trailing: "100%"              => vec![ Literal("100"), Percent ]);
        test!(escaped_then_text: "%%d"      => vec![ Percent, Literal("d") ]);
        test!(unicode: "é%aé"               => vec![ Literal("é"), Directive('a'), Literal("é") ]);
    }

    mod render {
        use super::*;

        struct Letters;

        impl Directives for Letters {
            fn directive(&self, code: char) -> Option<String> {
                match code {
                    'a' => Some("alpha".into()),
                    'b' => Some("beta".into()),
                    _   => None,
                }
            }
        }

        #[test]
        fn known() {
            assert_eq!(cformat("%a and %b", &Letters), "alpha and beta");
        }

        #[test]
        fn unknown_passes_through() {
            assert_eq!(cformat("%a%q", &Letters), "alpha%q");
        }

        #[test]
        fn percents() {
            assert_eq!(cformat("%%a %", &Letters), "%a %");
        }
    }

    mod helpers {
        use super::super::{zero_padded, signed_year, short_year, weekday_name, month_name};

        #[test]
        fn padding() {
            assert_eq!(zero_padded(7, 3), "007");
            assert_eq!(zero_padded(1234, 3), "1234");
        }

        #[test]
        fn years() {
            assert_eq!(signed_year(2024), "2024");
            assert_eq!(signed_year(42), "0042");
            assert_eq!(signed_year(-753), "-0753");
            assert_eq!(signed_year(12345), "12345");
            assert_eq!(short_year(1999), "99");
            assert_eq!(short_year(-1), "99");
        }

        #[test]
        fn names() {
            assert_eq!(weekday_name(1, true), "Monday");
            assert_eq!(weekday_name(5, true), "Friday");
            assert_eq!(weekday_name(7, true), "Sunday");
            assert_eq!(weekday_name(7, false), "Sun");
            assert_eq!(month_name(1, true), "January");
            assert_eq!(month_name(12, false), "Dec");
        }
    }
}
