/// One row of the output constituent table.
///
/// `output_id` is the name written to the harmonic file; `source_id` is the
/// TICON column it is read from, or `None` when TICON carries no series for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstituentMapping {
    pub output_id: &'static str,
    pub source_id: Option<&'static str>,
}

impl ConstituentMapping {
    pub const fn new(output_id: &'static str, source_id: &'static str) -> Self {
        Self {
            output_id,
            source_id: Some(source_id),
        }
    }

    pub const fn unobserved(output_id: &'static str) -> Self {
        Self {
            output_id,
            source_id: None,
        }
    }

    pub fn is_renamed(&self) -> bool {
        self.source_id.is_some_and(|source| source != self.output_id)
    }
}

/// Output constituents in harmonic-file order.
///
/// Line order of every station block follows this slice exactly; appending or
/// reordering entries changes the file format consumed by `build_tide_db`.
pub static CONSTITUENT_TABLE: &[ConstituentMapping] = &[
    ConstituentMapping::new("J1", "J1"),
    ConstituentMapping::new("K1", "K1"),
    ConstituentMapping::new("K2", "K2"),
    ConstituentMapping::new("L2", "L2"),
    ConstituentMapping::new("M1", "M1"),
    ConstituentMapping::new("M2", "M2"),
    ConstituentMapping::new("M3", "M3"),
    ConstituentMapping::new("M4", "M4"),
    ConstituentMapping::new("M6", "M6"),
    ConstituentMapping::new("M8", "M8"),
    ConstituentMapping::new("N2", "N2"),
    ConstituentMapping::new("2N2", "2N2"),
    ConstituentMapping::new("O1", "O1"),
    ConstituentMapping::new("OO1", "OO1"),
    ConstituentMapping::new("P1", "P1"),
    ConstituentMapping::new("Q1", "Q1"),
    ConstituentMapping::new("2Q1", "2Q1"),
    ConstituentMapping::new("R2", "R2"),
    ConstituentMapping::new("S1", "S1"),
    ConstituentMapping::new("S2", "S2"),
    ConstituentMapping::new("S4", "S4"),
    ConstituentMapping::new("S6", "S6"),
    ConstituentMapping::new("T2", "T2"),
    ConstituentMapping::new("LDA2", "LM2"),
    ConstituentMapping::new("MU2", "MI2"),
    ConstituentMapping::new("NU2", "NI2"),
    ConstituentMapping::new("RHO1", "RHO1"),
    ConstituentMapping::new("MK3", "MK3"),
    ConstituentMapping::new("2MK3", "2MK3"),
    ConstituentMapping::new("MN4", "MN4"),
    ConstituentMapping::new("MS4", "MS4"),
    ConstituentMapping::new("2SM2", "2SM2"),
    ConstituentMapping::new("MF", "MF"),
    ConstituentMapping::new("MSF", "MSF"),
    ConstituentMapping::new("MM", "MM"),
    ConstituentMapping::new("SA", "SA"),
    ConstituentMapping::new("SSA", "SSA"),
    ConstituentMapping::new("SA-IOS", "SA-IOS"),
    ConstituentMapping::new("MF-IOS", "MF-IOS"),
    ConstituentMapping::new("S1-IOS", "S1-IOS"),
    ConstituentMapping::new("OO1-IOS", "OO1-IOS"),
    ConstituentMapping::new("R2-IOS", "R2-IOS"),
    ConstituentMapping::new("A7", "A7"),
    ConstituentMapping::new("2MK5", "2MK5"),
    ConstituentMapping::new("2MK6", "2MK6"),
    ConstituentMapping::new("2MN2", "2MN2"),
    ConstituentMapping::new("2MN6", "2MN6"),
    ConstituentMapping::new("2MS6", "2MS6"),
    ConstituentMapping::new("2NM6", "2NM6"),
    ConstituentMapping::new("2SK5", "2SK5"),
    ConstituentMapping::new("2SM6", "2SM6"),
    ConstituentMapping::new("3MK7", "3MK7"),
    ConstituentMapping::new("3MN8", "3MN8"),
    ConstituentMapping::new("3MS2", "3MS2"),
    ConstituentMapping::new("3MS4", "3MS4"),
    ConstituentMapping::new("3MS8", "3MS8"),
    ConstituentMapping::new("ALP1", "ALP1"),
    ConstituentMapping::new("BET1", "BET1"),
    ConstituentMapping::new("CHI1", "CHI1"),
    ConstituentMapping::new("H1", "H1"),
    ConstituentMapping::new("H2", "H2"),
    ConstituentMapping::new("KJ2", "KJ2"),
    ConstituentMapping::new("ETA2", "ETA2"),
    ConstituentMapping::new("KQ1", "KQ1"),
    ConstituentMapping::new("UPS1", "UPS1"),
    ConstituentMapping::new("M10", "M10"),
    ConstituentMapping::new("M12", "M12"),
    ConstituentMapping::new("MK4", "MK4"),
    ConstituentMapping::new("MKS2", "MKS2"),
    ConstituentMapping::new("MNS2", "MNS2"),
    ConstituentMapping::new("EPS2", "EP2"),
    ConstituentMapping::new("MO3", "MO3"),
    ConstituentMapping::new("MP1", "MP1"),
    ConstituentMapping::new("TAU1", "TAU1"),
    ConstituentMapping::new("MPS2", "MPS2"),
    ConstituentMapping::new("MSK6", "MSK6"),
    ConstituentMapping::new("MSM", "MSM"),
    ConstituentMapping::new("MSN2", "MSN2"),
    ConstituentMapping::new("MSN6", "MSN6"),
    ConstituentMapping::new("NLK2", "NLK2"),
    ConstituentMapping::new("NO1", "NO1"),
    ConstituentMapping::new("OP2", "OP2"),
    ConstituentMapping::new("OQ2", "OQ2"),
    ConstituentMapping::new("PHI1", "PHI1"),
    ConstituentMapping::new("KP1", "KP1"),
    ConstituentMapping::new("PI1", "PI1"),
    ConstituentMapping::new("TK1", "TK1"),
    ConstituentMapping::new("PSI1", "PSI1"),
    ConstituentMapping::new("RP1", "RP1"),
    ConstituentMapping::new("S3", "S3"),
    ConstituentMapping::new("SIG1", "SIG1"),
    ConstituentMapping::new("SK3", "SK3"),
    ConstituentMapping::new("SK4", "SK4"),
    ConstituentMapping::new("SN4", "SN4"),
    ConstituentMapping::new("SNK6", "SNK6"),
    ConstituentMapping::new("SO1", "SO1"),
    ConstituentMapping::new("SO3", "SO3"),
    ConstituentMapping::new("THE1", "THE1"),
    ConstituentMapping::new("2PO1", "2PO1"),
    ConstituentMapping::new("2NS2", "2NS2"),
    ConstituentMapping::new("MLN2S2", "MLN2S2"),
    ConstituentMapping::new("2ML2S2", "2ML2S2"),
    ConstituentMapping::new("SKM2", "SKM2"),
    ConstituentMapping::new("2MS2K2", "2MS2K2"),
    ConstituentMapping::new("MKL2S2", "MKL2S2"),
    ConstituentMapping::new("M2(KS)2", "M2(KS)2"),
    ConstituentMapping::new("2SN(MK)2", "2SN(MK)2"),
    ConstituentMapping::new("2KM(SN)2", "2KM(SN)2"),
    ConstituentMapping::new("NO3", "NO3"),
    ConstituentMapping::new("2MLS4", "2MLS4"),
    ConstituentMapping::new("ML4", "ML4"),
    ConstituentMapping::new("N4", "N4"),
    ConstituentMapping::new("SL4", "SL4"),
    ConstituentMapping::new("MNO5", "MNO5"),
    ConstituentMapping::new("2MO5", "2MO5"),
    ConstituentMapping::new("MSK5", "MSK5"),
    ConstituentMapping::new("2MP5", "2MP5"),
    ConstituentMapping::new("3MP5", "3MP5"),
    ConstituentMapping::new("MNK5", "MNK5"),
    ConstituentMapping::new("2NMLS6", "2NMLS6"),
    ConstituentMapping::new("MSL6", "MSL6"),
    ConstituentMapping::new("2ML6", "2ML6"),
    ConstituentMapping::new("2MNLS6", "2MNLS6"),
    ConstituentMapping::new("3MLS6", "3MLS6"),
    ConstituentMapping::new("2MNO7", "2MNO7"),
    ConstituentMapping::new("2NMK7", "2NMK7"),
    ConstituentMapping::new("2MSO7", "2MSO7"),
    ConstituentMapping::new("MSKO7", "MSKO7"),
    ConstituentMapping::new("2MSN8", "2MSN8"),
    ConstituentMapping::new("2(MS)8", "2(MS)8"),
    ConstituentMapping::new("2(MN)8", "2(MN)8"),
    ConstituentMapping::new("2MSL8", "2MSL8"),
    ConstituentMapping::new("4MLS8", "4MLS8"),
    ConstituentMapping::new("3ML8", "3ML8"),
    ConstituentMapping::new("3MK8", "3MK8"),
    ConstituentMapping::new("2MSK8", "2MSK8"),
    ConstituentMapping::new("2M2NK9", "2M2NK9"),
    ConstituentMapping::new("3MNK9", "3MNK9"),
    ConstituentMapping::new("4MK9", "4MK9"),
    ConstituentMapping::new("3MSK9", "3MSK9"),
    ConstituentMapping::new("4MN10", "4MN10"),
    ConstituentMapping::new("3MNS10", "3MNS10"),
    ConstituentMapping::new("4MS10", "4MS10"),
    ConstituentMapping::new("3MSL10", "3MSL10"),
    ConstituentMapping::new("3M2S10", "3M2S10"),
    ConstituentMapping::new("4MSK11", "4MSK11"),
    ConstituentMapping::new("4MNS12", "4MNS12"),
    ConstituentMapping::new("5MS12", "5MS12"),
    ConstituentMapping::new("4MSL12", "4MSL12"),
    ConstituentMapping::new("4M2S12", "4M2S12"),
    ConstituentMapping::new("M1C", "M1C"),
    ConstituentMapping::new("3MKS2", "3MKS2"),
    ConstituentMapping::new("OQ2-HORN", "OQ2-HORN"),
    ConstituentMapping::new("MSK2", "MSK2"),
    ConstituentMapping::new("MSP2", "MSP2"),
    ConstituentMapping::new("2MP3", "2MP3"),
    ConstituentMapping::new("4MS4", "4MS4"),
    ConstituentMapping::new("2MNS4", "2MNS4"),
    ConstituentMapping::new("2MSK4", "2MSK4"),
    ConstituentMapping::new("3MN4", "3MN4"),
    ConstituentMapping::new("2MSN4", "2MSN4"),
    ConstituentMapping::new("3MK5", "3MK5"),
    ConstituentMapping::new("3MO5", "3MO5"),
    ConstituentMapping::new("3MNS6", "3MNS6"),
    ConstituentMapping::new("4MS6", "4MS6"),
    ConstituentMapping::new("2MNU6", "2MNU6"),
    ConstituentMapping::new("3MSK6", "3MSK6"),
    ConstituentMapping::new("MKNU6", "MKNU6"),
    ConstituentMapping::new("3MSN6", "3MSN6"),
    ConstituentMapping::new("M7", "M7"),
    ConstituentMapping::new("2MNK8", "2MNK8"),
    ConstituentMapping::new("2(MS)N10", "2(MS)N10"),
    ConstituentMapping::new("MNUS2", "MNUS2"),
    ConstituentMapping::new("2MK2", "2MK2"),
    ConstituentMapping::new("3KM5", "3KM5"),
    ConstituentMapping::new("KJ2-IHO", "KJ2-IHO"),
];

/// Number of constituent lines written per station.
pub fn constituent_count() -> usize {
    CONSTITUENT_TABLE.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_size_and_order() {
        assert_eq!(constituent_count(), 176);
        assert_eq!(CONSTITUENT_TABLE[0], ConstituentMapping::new("J1", "J1"));
        assert_eq!(CONSTITUENT_TABLE[5], ConstituentMapping::new("M2", "M2"));
        assert_eq!(
            CONSTITUENT_TABLE.last().copied(),
            Some(ConstituentMapping::new("KJ2-IHO", "KJ2-IHO"))
        );
    }

    #[test]
    fn test_output_ids_are_unique() {
        let mut seen = HashSet::new();
        for mapping in CONSTITUENT_TABLE {
            assert!(seen.insert(mapping.output_id), "duplicate {}", mapping.output_id);
        }
    }

    #[test]
    fn test_renamed_constituents() {
        let renamed: Vec<(&str, &str)> = CONSTITUENT_TABLE
            .iter()
            .filter(|m| m.is_renamed())
            .map(|m| (m.output_id, m.source_id.unwrap()))
            .collect();

        assert_eq!(
            renamed,
            vec![
                ("LDA2", "LM2"),
                ("MU2", "MI2"),
                ("NU2", "NI2"),
                ("EPS2", "EP2"),
            ]
        );
    }

    #[test]
    fn test_output_ids_fit_name_column() {
        assert!(CONSTITUENT_TABLE.iter().all(|m| m.output_id.len() <= 10));
    }

    #[test]
    fn test_unobserved_mapping() {
        let mapping = ConstituentMapping::unobserved("SA");
        assert_eq!(mapping.source_id, None);
        assert!(!mapping.is_renamed());
    }
}
