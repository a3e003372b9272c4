//! Attaching calendars and time representations to `Date` and `Time`.
//!
//! Neither `Date` nor `Time` knows about any particular calendar or clock.
//! Instead, each has a process-wide registry of *representations*: a name,
//! a Rust type, and the two functions that convert between that type and
//! the canonical value (a day count for dates, a day fraction and
//! optional UTC offset for times). The Gregorian and ISO calendars, and the
//! western and internet clocks, are installed into these registries the
//! first time either is used, through the same code path as any other.
//!
//! Once a representation is installed, every `Date` or `Time` can produce
//! it on demand. The first time a view is asked for, it gets computed from
//! the canonical value and cached on that instance; later requests reuse
//! the cached view. Views are never computed eagerly.
//!
//! ```
//! use ratadie::{Date, register_new_calendar};
//! use ratadie::cal::Calendar;
//!
//! /// Counts weeks since the epoch.
//! struct WeekCount { weeks: i64, day: i64 }
//!
//! impl Calendar for WeekCount {
//!     fn to_rata_die(&self) -> i64 { self.weeks * 7 + self.day }
//!     fn from_rata_die(day_count: i64) -> Self {
//!         WeekCount { weeks: day_count.div_euclid(7), day: day_count.rem_euclid(7) }
//!     }
//! }
//!
//! register_new_calendar::<WeekCount>("week_count").unwrap();
//!
//! let date = Date::new(15);
//! assert_eq!(date.calendar::<WeekCount>().unwrap().weeks, 2);
//! assert!(register_new_calendar::<WeekCount>("week_count").is_err());
//! ```

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use num_rational::BigRational;

use cal::Calendar;
use cal::gregorian::GregorianCalendar;
use cal::iso::IsoCalendar;
use clock::TimeRepresentation;
use clock::internet::InternetTime;
use clock::western::WesternTime;
use error::Error;


/// A derived view of a `Date` or `Time`, with its type erased.
pub type View = Arc<dyn Any + Send + Sync>;

/// The canonical value of a `Time`: the day fraction, and the UTC offset
/// as a fraction of a day if there is one.
pub type TimePair = (BigRational, Option<BigRational>);

/// Names that `Date` already uses, which no calendar can take.
const DATE_ATTRIBUTES: &[&str] = &[
    "calendar", "checked_add", "checked_sub", "day_count", "from_calendar",
    "new", "today", "view",
];

/// Names that `Time` already uses, which no time representation can take.
const TIME_ATTRIBUTES: &[&str] = &[
    "checked_sub_time", "day_frac", "from_representation", "is_naive",
    "localnow", "new", "now", "relocate", "representation", "try_cmp",
    "utcnow", "utcoffset", "view", "with_utcoffset",
];


/// The two conversions that attach a calendar type to `Date`, given as
/// plain functions.
///
/// Any type implementing `Calendar` can use `CalendarHooks::derive()`.
/// Other types fill in the hooks by hand, and a hooks value with either
/// one missing is refused when it is registered.
pub struct CalendarHooks<C> {
    pub to_rata_die:   Option<fn(&C) -> i64>,
    pub from_rata_die: Option<fn(i64) -> C>,
}

impl<C> CalendarHooks<C> {

    /// A hooks value with neither conversion filled in.
    pub fn empty() -> Self {
        CalendarHooks { to_rata_die: None, from_rata_die: None }
    }
}

impl<C: Calendar> CalendarHooks<C> {

    /// The hooks of a type that implements `Calendar`.
    pub fn derive() -> Self {
        CalendarHooks {
            to_rata_die:   Some(C::to_rata_die),
            from_rata_die: Some(C::from_rata_die),
        }
    }
}

impl<C: Any + Send + Sync> CalendarHooks<C> {
    fn into_entry(self, name: &str) -> Result<Entry<i64>, Error> {
        let to   = self.to_rata_die.ok_or_else(|| missing::<C>("to_rata_die"))?;
        let from = self.from_rata_die.ok_or_else(|| missing::<C>("from_rata_die"))?;

        Ok(Entry {
            name:           name.to_owned(),
            type_id:        TypeId::of::<C>(),
            type_name:      type_name::<C>(),
            to_canonical:   Arc::new(move |view: &(dyn Any + Send + Sync)| view.downcast_ref::<C>().map(to)),
            from_canonical: Arc::new(move |day_count: &i64| Arc::new(from(*day_count)) as View),
        })
    }
}


/// The two conversions that attach a time representation to `Time`,
/// given as plain functions. See `CalendarHooks`.
pub struct TimeHooks<T> {
    pub to_time_pair:   Option<fn(&T) -> TimePair>,
    pub from_time_pair: Option<fn(BigRational, Option<BigRational>) -> T>,
}

impl<T> TimeHooks<T> {

    /// A hooks value with neither conversion filled in.
    pub fn empty() -> Self {
        TimeHooks { to_time_pair: None, from_time_pair: None }
    }
}

impl<T: TimeRepresentation> TimeHooks<T> {

    /// The hooks of a type that implements `TimeRepresentation`.
    pub fn derive() -> Self {
        TimeHooks {
            to_time_pair:   Some(T::to_time_pair),
            from_time_pair: Some(T::from_time_pair),
        }
    }
}

impl<T: Any + Send + Sync> TimeHooks<T> {
    fn into_entry(self, name: &str) -> Result<Entry<TimePair>, Error> {
        let to   = self.to_time_pair.ok_or_else(|| missing::<T>("to_time_pair"))?;
        let from = self.from_time_pair.ok_or_else(|| missing::<T>("from_time_pair"))?;

        Ok(Entry {
            name:           name.to_owned(),
            type_id:        TypeId::of::<T>(),
            type_name:      type_name::<T>(),
            to_canonical:   Arc::new(move |view: &(dyn Any + Send + Sync)| view.downcast_ref::<T>().map(to)),
            from_canonical: Arc::new(move |pair: &TimePair| Arc::new(from(pair.0.clone(), pair.1.clone())) as View),
        })
    }
}

impl<C> fmt::Debug for CalendarHooks<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CalendarHooks")
         .field("to_rata_die", &self.to_rata_die.is_some())
         .field("from_rata_die", &self.from_rata_die.is_some())
         .finish()
    }
}

impl<T> fmt::Debug for TimeHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TimeHooks")
         .field("to_time_pair", &self.to_time_pair.is_some())
         .field("from_time_pair", &self.from_time_pair.is_some())
         .finish()
    }
}

fn missing<R>(conversion: &str) -> Error {
    Error::Capability(format!("{} has no {} conversion", type_name::<R>(), conversion))
}


/// One installed representation, with its type erased. `K` is the
/// canonical value of the core type it is attached to.
pub(crate) struct Entry<K> {
    pub(crate) name:           String,
    pub(crate) type_id:        TypeId,
    pub(crate) type_name:      &'static str,
    pub(crate) to_canonical:   Arc<dyn Fn(&(dyn Any + Send + Sync)) -> Option<K> + Send + Sync>,
    pub(crate) from_canonical: Arc<dyn Fn(&K) -> View + Send + Sync>,
}

impl<K> Clone for Entry<K> {
    fn clone(&self) -> Self {
        Entry {
            name:           self.name.clone(),
            type_id:        self.type_id,
            type_name:      self.type_name,
            to_canonical:   Arc::clone(&self.to_canonical),
            from_canonical: Arc::clone(&self.from_canonical),
        }
    }
}

impl<K> fmt::Debug for Entry<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Entry({} => {})", self.name, self.type_name)
    }
}


/// The representations installed on one core type.
pub(crate) struct Registry<K> {
    owner:    &'static str,
    reserved: &'static [&'static str],
    entries:  Vec<Entry<K>>,
}

impl<K> Registry<K> {
    fn new(owner: &'static str, reserved: &'static [&'static str]) -> Self {
        Registry { owner, reserved, entries: Vec::new() }
    }

    /// Checks the name, then installs the entry under it.
    fn install(&mut self, entry: Result<Entry<K>, Error>, name: &str) -> Result<(), Error> {
        if let Err(e) = self.check_name(name) {
            debug!(owner = self.owner, name = name, "refused registration: {}", e.message());
            return Err(e);
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(owner = self.owner, name = name, "refused registration: {}", e.message());
                return Err(e);
            }
        };

        debug!(owner = self.owner, name = name, type_name = entry.type_name, "installed representation");
        self.entries.push(entry);
        Ok(())
    }

    fn check_name(&self, name: &str) -> Result<(), Error> {
        if !is_identifier(name) {
            return Err(Error::Name(format!("{:?} is not a valid identifier", name)));
        }

        if self.reserved.contains(&name) {
            return Err(Error::Name(format!("{:?} is already an attribute of {}", name, self.owner)));
        }

        if self.by_name(name).is_some() {
            return Err(Error::Name(format!("{:?} is already registered on {}", name, self.owner)));
        }

        Ok(())
    }

    pub(crate) fn by_name(&self, name: &str) -> Option<&Entry<K>> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// The first entry installed for the given type.
    pub(crate) fn by_type(&self, type_id: TypeId) -> Option<&Entry<K>> {
        self.entries.iter().find(|e| e.type_id == type_id)
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }
}

/// Whether the name could be an attribute: a letter or underscore, then
/// letters, digits, and underscores.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {},
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_')
}


lazy_static! {
    static ref CALENDARS: RwLock<Registry<i64>> = {
        let mut registry = Registry::new("Date", DATE_ATTRIBUTES);
        registry.install(CalendarHooks::<GregorianCalendar>::derive().into_entry("gregorian"), "gregorian")
                .expect("default calendar could not be installed");
        registry.install(CalendarHooks::<IsoCalendar>::derive().into_entry("iso"), "iso")
                .expect("default calendar could not be installed");
        RwLock::new(registry)
    };

    static ref TIMES: RwLock<Registry<TimePair>> = {
        let mut registry = Registry::new("Time", TIME_ATTRIBUTES);
        registry.install(TimeHooks::<WesternTime>::derive().into_entry("western"), "western")
                .expect("default time representation could not be installed");
        registry.install(TimeHooks::<InternetTime>::derive().into_entry("internet"), "internet")
                .expect("default time representation could not be installed");
        RwLock::new(registry)
    };
}

// A panic while holding one of these locks can’t leave a registry half
// updated, as an entry is only pushed once it is complete.

fn read<K>(lock: &RwLock<Registry<K>>) -> RwLockReadGuard<Registry<K>> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<K>(lock: &RwLock<Registry<K>>) -> RwLockWriteGuard<Registry<K>> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}


/// Installs a calendar type on `Date` under the given name.
///
/// This fails with a `Name` error if the name isn’t an identifier, is
/// one of `Date`’s own attributes, or is already taken.
pub fn register_new_calendar<C: Calendar>(name: &str) -> Result<(), Error> {
    register_calendar_hooks(name, CalendarHooks::<C>::derive())
}

/// Installs a calendar type on `Date` under the given name, using the
/// given conversions. This fails with a `Capability` error if either
/// conversion is missing, as well as for the reasons `register_new_calendar`
/// can fail.
pub fn register_calendar_hooks<C: Any + Send + Sync>(name: &str, hooks: CalendarHooks<C>) -> Result<(), Error> {
    write(&CALENDARS).install(hooks.into_entry(name), name)
}

/// Installs a time representation type on `Time` under the given name.
pub fn register_new_time<T: TimeRepresentation>(name: &str) -> Result<(), Error> {
    register_time_hooks(name, TimeHooks::<T>::derive())
}

/// Installs a time representation type on `Time` under the given name,
/// using the given conversions.
pub fn register_time_hooks<T: Any + Send + Sync>(name: &str, hooks: TimeHooks<T>) -> Result<(), Error> {
    write(&TIMES).install(hooks.into_entry(name), name)
}

/// The names of every calendar installed on `Date`, in the order they
/// were installed.
pub fn calendar_names() -> Vec<String> {
    read(&CALENDARS).names()
}

/// The names of every time representation installed on `Time`, in the
/// order they were installed.
pub fn time_names() -> Vec<String> {
    read(&TIMES).names()
}

pub(crate) fn calendar_by_name(name: &str) -> Option<Entry<i64>> {
    read(&CALENDARS).by_name(name).cloned()
}

pub(crate) fn calendar_by_type(type_id: TypeId) -> Option<Entry<i64>> {
    read(&CALENDARS).by_type(type_id).cloned()
}

pub(crate) fn time_by_name(name: &str) -> Option<Entry<TimePair>> {
    read(&TIMES).by_name(name).cloned()
}

pub(crate) fn time_by_type(type_id: TypeId) -> Option<Entry<TimePair>> {
    read(&TIMES).by_type(type_id).cloned()
}


/// The views that have been derived for one `Date` or `Time`, keyed by
/// the type of the view.
///
/// Two threads asking for the same view at once may both compute it. The
/// first one stored wins, and since both are computed from the same
/// canonical value, they are equal anyway.
pub(crate) struct ViewCache {
    views: RwLock<HashMap<TypeId, View>>,
}

impl ViewCache {
    pub(crate) fn new() -> Self {
        ViewCache { views: RwLock::new(HashMap::new()) }
    }

    /// A cache that already holds the view it was built from.
    pub(crate) fn seeded(view: View) -> Self {
        let cache = Self::new();
        let _ = cache.get_or_insert(view);
        cache
    }

    pub(crate) fn get(&self, type_id: TypeId) -> Option<View> {
        let views = self.views.read().unwrap_or_else(PoisonError::into_inner);
        views.get(&type_id).cloned()
    }

    /// Stores the view if there isn’t one of its type yet, and returns
    /// whichever one ends up stored.
    pub(crate) fn get_or_insert(&self, view: View) -> View {
        let type_id = (*view).type_id();
        let mut views = self.views.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(views.entry(type_id).or_insert(view))
    }

    pub(crate) fn len(&self) -> usize {
        self.views.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns the cached view for the entry, deriving it from the
    /// canonical value first if need be.
    pub(crate) fn derive<K>(&self, entry: &Entry<K>, canonical: &K) -> View {
        if let Some(view) = self.get(entry.type_id) {
            return view;
        }

        trace!(name = entry.name.as_str(), type_name = entry.type_name, "deriving view");
        self.get_or_insert((entry.from_canonical)(canonical))
    }
}

impl Clone for ViewCache {
    fn clone(&self) -> Self {
        let views = self.views.read().unwrap_or_else(PoisonError::into_inner);
        ViewCache { views: RwLock::new(views.clone()) }
    }
}

impl fmt::Debug for ViewCache {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ViewCache({} views)", self.len())
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use error::ErrorKind;

    struct Nothing;

    struct Twice(i64);

    impl Calendar for Twice {
        fn to_rata_die(&self) -> i64 { self.0 / 2 }
        fn from_rata_die(day_count: i64) -> Self { Twice(day_count * 2) }
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("gregorian"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2nd"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("dash-ed"));
    }

    #[test]
    fn defaults_are_installed() {
        let names = calendar_names();
        assert!(names.contains(&"gregorian".to_owned()));
        assert!(names.contains(&"iso".to_owned()));

        let names = time_names();
        assert!(names.contains(&"western".to_owned()));
        assert!(names.contains(&"internet".to_owned()));
    }

    #[test]
    fn missing_hooks() {
        let hooks = CalendarHooks::<Nothing>::empty();
        let err = register_calendar_hooks("registry_nothing", hooks).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capability);

        let hooks = CalendarHooks::<Twice> { to_rata_die: Some(|t: &Twice| t.0), from_rata_die: None };
        let err = register_calendar_hooks("registry_half", hooks).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Capability);
        assert!(calendar_by_name("registry_half").is_none());
    }

    #[test]
    fn reserved_names() {
        let err = register_new_calendar::<Twice>("day_count").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);

        let err = register_new_calendar::<Twice>("registry twice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);

        let err = register_new_calendar::<Twice>("gregorian").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);
    }

    #[test]
    fn erased_conversions() {
        register_new_calendar::<Twice>("registry_twice").unwrap();
        let entry = calendar_by_type(TypeId::of::<Twice>()).unwrap();

        let view = (entry.from_canonical)(&21);
        assert_eq!((entry.to_canonical)(&*view), Some(21));
        assert_eq!((entry.to_canonical)(&Nothing), None);
    }

    #[test]
    fn cache_keeps_the_first_view() {
        let cache = ViewCache::new();
        let first = cache.get_or_insert(Arc::new(Twice(2)));
        let second = cache.get_or_insert(Arc::new(Twice(4)));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.clone().len(), 1);
    }
}
