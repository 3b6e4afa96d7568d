//! Fixed name pools for synthetic employees. Majority surnames never start with the
//! minority letter, so the benchmark subset stays exactly identifiable.

pub const MINORITY_LETTER: char = 'F';

pub const MALE_SURNAMES: &[&str] = &[
    "Ivanov", "Petrov", "Sidorov", "Smirnov", "Kuznetsov", "Popov", "Vasiliev", "Sokolov",
    "Mikhailov", "Novikov", "Morozov", "Volkov", "Alekseev", "Lebedev", "Semenov", "Egorov",
    "Pavlov", "Kozlov", "Stepanov", "Nikolaev", "Orlov", "Andreev", "Makarov", "Nikitin",
    "Zakharov", "Zaitsev", "Soloviev", "Borisov", "Yakovlev", "Grigoriev", "Romanov",
    "Vorobiev", "Sergeev", "Kuzmin", "Belov", "Gusev", "Titov", "Kiselev", "Tarasov", "Belyaev",
];

pub const FEMALE_SURNAMES: &[&str] = &[
    "Ivanova", "Petrova", "Sidorova", "Smirnova", "Kuznetsova", "Popova", "Vasilieva",
    "Sokolova", "Mikhailova", "Novikova", "Morozova", "Volkova", "Alekseeva", "Lebedeva",
    "Semenova", "Egorova", "Pavlova", "Kozlova", "Stepanova", "Nikolaeva", "Orlova", "Andreeva",
    "Makarova", "Nikitina", "Zakharova", "Zaitseva", "Solovieva", "Borisova", "Yakovleva",
    "Grigorieva", "Romanova", "Vorobieva", "Sergeeva", "Kuzmina", "Belova", "Guseva", "Titova",
    "Kiseleva", "Tarasova", "Belyaeva",
];

pub const MINORITY_SURNAMES: &[&str] = &[
    "Fedorov", "Filippov", "Frolov", "Fomin", "Fadeev", "Fokin", "Filatov", "Fedoseev",
    "Fedotov", "Fursov",
];

pub const MALE_GIVEN_NAMES: &[&str] = &[
    "Ivan", "Petr", "Sergey", "Alexey", "Dmitry", "Andrey", "Nikolay", "Mikhail", "Vladimir",
    "Pavel", "Artem", "Maxim", "Roman", "Oleg", "Igor", "Yuri", "Boris", "Victor", "Denis",
    "Kirill",
];

pub const FEMALE_GIVEN_NAMES: &[&str] = &[
    "Anna", "Maria", "Elena", "Olga", "Natalia", "Irina", "Tatiana", "Svetlana", "Ekaterina",
    "Anastasia", "Yulia", "Daria", "Polina", "Sofia", "Ksenia", "Vera", "Galina", "Lyudmila",
    "Alina", "Marina",
];

pub const MALE_PATRONYMICS: &[&str] = &[
    "Ivanovich", "Petrovich", "Sergeevich", "Alexeevich", "Dmitrievich", "Andreevich",
    "Nikolaevich", "Mikhailovich", "Vladimirovich", "Pavlovich", "Olegovich", "Igorevich",
    "Borisovich", "Viktorovich", "Romanovich", "Maximovich",
];

pub const FEMALE_PATRONYMICS: &[&str] = &[
    "Ivanovna", "Petrovna", "Sergeevna", "Alexeevna", "Dmitrievna", "Andreevna", "Nikolaevna",
    "Mikhailovna", "Vladimirovna", "Pavlovna", "Olegovna", "Igorevna", "Borisovna",
    "Viktorovna", "Romanovna", "Maximovna",
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: &[&[&str]] = &[
        MALE_SURNAMES,
        FEMALE_SURNAMES,
        MINORITY_SURNAMES,
        MALE_GIVEN_NAMES,
        FEMALE_GIVEN_NAMES,
        MALE_PATRONYMICS,
        FEMALE_PATRONYMICS,
    ];

    #[test]
    fn pools_are_title_cased_ascii() {
        for pool in ALL {
            assert!(!pool.is_empty());
            for name in *pool {
                assert!(name.chars().all(|c| c.is_ascii_alphabetic()), "{name}");
                assert_eq!(crate::employee::title_case(name), *name);
            }
        }
    }

    #[test]
    fn only_minority_surnames_use_the_letter() {
        assert!(MINORITY_SURNAMES.iter().all(|s| s.starts_with(MINORITY_LETTER)));
        assert!(!MALE_SURNAMES.iter().any(|s| s.starts_with(MINORITY_LETTER)));
        assert!(!FEMALE_SURNAMES.iter().any(|s| s.starts_with(MINORITY_LETTER)));
    }
}
