#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    full_name: Option<&'a str>,
    birth_date: Option<&'a str>,
    gender: Option<&'a str>,
}

fuzz_target!(|input: Input<'_>| {
    // Accepted records must re-validate to themselves
    if let Ok(r) = staffdb::validate(input.full_name, input.birth_date, input.gender) {
        let date = r.birth_date().format(staffdb::employee::DATE_FORMAT).to_string();
        let again = staffdb::validate(Some(r.full_name().as_str()), Some(&date), Some(r.gender().as_str()));
        assert_eq!(again.as_ref(), Ok(&r));
    }
});
