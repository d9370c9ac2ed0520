//! Simulation control blocks
//!
//! A control set has nine optional sub-blocks. Any sub-block that is absent
//! or empty falls back to the fixed default line of its layout.

use serde::Deserialize;

use super::Scalar;
use crate::xref::Record;

record! {
    pub struct General {
        sdyer: "sdyer",
        sdday: "sdday",
        nyers: "nyers",
        nreps: "nreps",
        start: "start",
        rseed: "rseed",
        sname: "sname",
        smodel: "smodel",
    }
}

record! {
    pub struct Options {
        water: "water",
        nitro: "nitro",
        symbi: "symbi",
        phosp: "phosp",
        potas: "potas",
        dises: "dises",
        chem: "chem",
        till: "till",
        co2: "co2",
    }
}

record! {
    pub struct Methods {
        wther: "wther",
        incon: "incon",
        light: "light",
        evapo: "evapo",
        infil: "infil",
        photo: "photo",
        hydro: "hydro",
        nswit: "nswit",
        mesom: "mesom",
        mesev: "mesev",
        mesol: "mesol",
    }
}

record! {
    pub struct ManagementOptions {
        plant: "plant",
        irrig: "irrig",
        ferti: "ferti",
        resid: "resid",
        harvs: "harvs",
    }
}

record! {
    pub struct Outputs {
        fname: "fname",
        ovvew: "ovvew",
        sumry: "sumry",
        fropt: "fropt",
        grout: "grout",
        caout: "caout",
        waout: "waout",
        niout: "niout",
        miout: "miout",
        diout: "diout",
        vbose: "vbose",
        chout: "chout",
        opout: "opout",
    }
}

record! {
    pub struct AutoPlanting {
        date: "date",
        pfyer: "pfyer",
        pfday: "pfday",
        plyer: "plyer",
        plday: "plday",
        ph2ol: "ph2ol",
        ph2ou: "ph2ou",
        ph2od: "ph2od",
        pstmx: "pstmx",
        pstmn: "pstmn",
    }
}

record! {
    pub struct AutoIrrigation {
        imdep: "imdep",
        ithrl: "ithrl",
        ithru: "ithru",
        iroff: "iroff",
        imeth: "imeth",
        iramt: "iramt",
        ireff: "ireff",
    }
}

record! {
    pub struct AutoNitrogen {
        nmdep: "nmdep",
        nmthr: "nmthr",
        namnt: "namnt",
        ncode: "ncode",
        naoff: "naoff",
    }
}

record! {
    pub struct AutoResidues {
        ripcn: "ripcn",
        rtime: "rtime",
        ridep: "ridep",
    }
}

record! {
    pub struct AutoHarvest {
        hfrst: "hfrst",
        hlyer: "hlyer",
        hlday: "hlday",
        hpcnp: "hpcnp",
        hpcnr: "hpcnr",
    }
}

/// One simulation control set as stored in the control table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct SimControl {
    pub general: Option<General>,
    pub options: Option<Options>,
    pub methods: Option<Methods>,
    pub management: Option<ManagementOptions>,
    pub outputs: Option<Outputs>,
    pub planting: Option<AutoPlanting>,
    pub irrigation: Option<AutoIrrigation>,
    pub nitrogen: Option<AutoNitrogen>,
    pub residues: Option<AutoResidues>,
    pub harvests: Option<AutoHarvest>,
    pub co2y: Option<Scalar>,
    pub sdat: Option<Scalar>,
    pub hadat_valid: Option<Scalar>,
}

impl Record for SimControl {
    fn is_blank(&self) -> bool {
        self.general.is_none()
            && self.options.is_none()
            && self.methods.is_none()
            && self.management.is_none()
            && self.outputs.is_none()
            && self.planting.is_none()
            && self.irrigation.is_none()
            && self.nitrogen.is_none()
            && self.residues.is_none()
            && self.harvests.is_none()
            && self.co2y.is_none()
            && self.sdat.is_none()
            && self.hadat_valid.is_none()
    }
}

/// Control set keyed by its symbolic `sm` id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ControlEntry {
    pub sm: Option<Scalar>,
    #[serde(flatten)]
    pub control: SimControl,
}

/// Sub-block that carries at least one field.
pub fn present<T: Record>(block: &Option<T>) -> Option<&T> {
    block.as_ref().filter(|b| !b.is_blank())
}
