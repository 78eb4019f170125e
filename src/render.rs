//! Scaffold rendering.
//!
//! A candidate is first planned into a sequence of typed emission
//! instructions, then the instructions are written to the output stream.
//! Both scaffold variants share the same instruction sequence; the method
//! variant differs only by the receiver field prepended to `Input` and by
//! the receiver-qualified callee expression, so the two templates cannot
//! drift structurally.

use crate::signature::Candidate;
use std::io::{self, Write};

/// One field of a generated record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

/// The call expression wired into the harness body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// `add` for free functions, `Counter::make` for associated functions,
    /// `case.input.counter.add` for methods.
    pub callee: String,
    /// Positional arguments, in parameter order (`case.input.x`).
    pub args: Vec<String>,
    /// Positional assignment targets, in result order (`actual.i32`).
    pub outputs: Vec<String>,
}

/// One typed emission step of a scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    OpenTest { test_name: String },
    Record { name: &'static str, derive: Option<&'static str>, fields: Vec<Field> },
    CaseRecord,
    EmptyCaseTable,
    Harness { call: CallSite },
    CloseTest,
}

/// Plan the emission sequence for one candidate.
pub fn plan(candidate: &Candidate) -> Vec<Instruction> {
    let mut input_fields = Vec::new();
    if let Candidate::Method(method) = candidate {
        input_fields.push(Field {
            name: method.rcvr.name.clone(),
            ty: method.rcvr.ty.clone(),
        });
    }
    input_fields.extend(candidate.params().iter().map(|p| Field {
        name: p.name.clone(),
        ty: p.ty.clone(),
    }));

    let output_fields = candidate
        .results()
        .iter()
        .map(|r| Field {
            name: r.name.clone(),
            ty: r.ty.clone(),
        })
        .collect();

    let callee = match candidate {
        Candidate::Function(function) => function.call_path.clone(),
        Candidate::Method(method) => format!("case.input.{}.{}", method.rcvr.name, method.name),
    };
    let call = CallSite {
        callee,
        args: candidate
            .params()
            .iter()
            .map(|p| format!("case.input.{}", p.name))
            .collect(),
        outputs: candidate
            .results()
            .iter()
            .map(|r| format!("actual.{}", r.name))
            .collect(),
    };

    vec![
        Instruction::OpenTest {
            test_name: candidate.test_name(),
        },
        Instruction::Record {
            name: "Input",
            derive: None,
            fields: input_fields,
        },
        Instruction::Record {
            name: "Output",
            derive: Some("Debug, Default, PartialEq"),
            fields: output_fields,
        },
        Instruction::CaseRecord,
        Instruction::EmptyCaseTable,
        Instruction::Harness { call },
        Instruction::CloseTest,
    ]
}

/// Render a candidate's scaffold into the output stream.
///
/// Aborts on the first write failure; partially written output is left in
/// the stream.
pub fn render<W: Write + ?Sized>(candidate: &Candidate, out: &mut W) -> io::Result<()> {
    for instruction in plan(candidate) {
        write_instruction(&instruction, out)?;
    }
    Ok(())
}

fn write_instruction<W: Write + ?Sized>(instruction: &Instruction, out: &mut W) -> io::Result<()> {
    match instruction {
        Instruction::OpenTest { test_name } => {
            write!(out, "\n#[test]\nfn {test_name}() {{\n")
        }
        Instruction::Record {
            name,
            derive,
            fields,
        } => {
            if let Some(derive) = derive {
                writeln!(out, "    #[derive({derive})]")?;
            }
            writeln!(out, "    struct {name} {{")?;
            for field in fields {
                writeln!(out, "        {}: {},", field.name, field.ty)?;
            }
            writeln!(out, "    }}")?;
            writeln!(out)
        }
        Instruction::CaseRecord => {
            writeln!(out, "    struct Case {{")?;
            writeln!(out, "        name: &'static str,")?;
            writeln!(out, "        input: Input,")?;
            writeln!(out, "        expect: Output,")?;
            writeln!(out, "    }}")?;
            writeln!(out)
        }
        Instruction::EmptyCaseTable => {
            writeln!(out, "    // TODO: add test cases")?;
            writeln!(out, "    let cases: Vec<Case> = vec![];")?;
            writeln!(out)
        }
        Instruction::Harness { call } => {
            writeln!(out, "    for case in cases {{")?;
            writeln!(out, "        let mut actual = Output::default();")?;
            let invocation = format!("{}({})", call.callee, call.args.join(", "));
            if call.outputs.len() == 1 {
                writeln!(out, "        {} = {};", call.outputs[0], invocation)?;
            } else {
                writeln!(out, "        ({}) = {};", call.outputs.join(", "), invocation)?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "        assert_eq!(actual, case.expect, \"case '{{}}'\", case.name);"
            )?;
            writeln!(out, "    }}")
        }
        Instruction::CloseTest => writeln!(out, "}}"),
    }
}
