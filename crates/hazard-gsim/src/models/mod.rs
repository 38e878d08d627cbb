//! Published ground-motion models.

mod vacareanu_2015;

pub use vacareanu_2015::VacareanuEtAl2015;
