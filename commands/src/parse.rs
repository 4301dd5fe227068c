use plan_types::MonitorFlags;

use crate::{Command, ParseError};

/// Parses one line of the text command grammar into a typed [`Command`].
///
/// The grammar has no whitespace-format flexibility beyond "fields
/// separated by ASCII whitespace" (`sscanf("%c %c %i %i ...")` in the
/// source); a line with the wrong argument count for its two-letter verb
/// is rejected outright, matching the source's `nRtn ==` argument-count
/// guards.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().ok_or(ParseError)?;
    let noun = tokens.next().ok_or(ParseError)?;
    if verb.len() != 1 || noun.len() != 1 {
        return Err(ParseError);
    }

    let args: Vec<i64> = tokens.map(|t| t.parse::<i64>()).collect::<Result<_, _>>().map_err(|_| ParseError)?;

    match (verb, noun) {
        ("A", "D") => add_drive(&args),
        ("A", "C") => add_competence(&args),
        ("A", "A") => add_action(&args),
        ("A", "P") => add_action_pattern(&args),
        ("A", "E") => add_competence_element(&args),
        ("A", "L") => add_action_pattern_element(&args),
        ("D", "N") => one_id(&args).map(Command::DisplayNode),
        ("D", "C") => one_id(&args).map(Command::DisplayCounters),
        ("D", "H") => none(&args).map(|()| Command::DisplayHighest),
        ("M", "N") => set_node_monitor(&args),
        ("M", "G") => set_global_monitor(&args),
        ("R", "C") => none(&args).map(|()| Command::ResetClear),
        ("R", "I") => reset_init(&args),
        ("S", "C") => none(&args).map(|()| Command::SizeCounts),
        ("S", "S") => none(&args).map(|()| Command::SizeTotal),
        ("I", "S") => one_i32(&args).map(Command::SetPlanId),
        ("I", "R") => none(&args).map(|()| Command::GetPlanId),
        _ => Err(ParseError),
    }
}

fn none(args: &[i64]) -> Result<(), ParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(ParseError)
    }
}

fn one_id(args: &[i64]) -> Result<plan_types::ElementId, ParseError> {
    match args {
        [id] => to_u16(*id),
        _ => Err(ParseError),
    }
}

fn one_i32(args: &[i64]) -> Result<i32, ParseError> {
    match args {
        [v] => i32::try_from(*v).map_err(|_| ParseError),
        _ => Err(ParseError),
    }
}

fn to_u16(v: i64) -> Result<u16, ParseError> {
    u16::try_from(v).map_err(|_| ParseError)
}

fn to_u32(v: i64) -> Result<u32, ParseError> {
    u32::try_from(v).map_err(|_| ParseError)
}

fn to_u8(v: i64) -> Result<u8, ParseError> {
    u8::try_from(v).map_err(|_| ParseError)
}

fn to_i32(v: i64) -> Result<i32, ParseError> {
    i32::try_from(v).map_err(|_| ParseError)
}

/// `A D` — 12 parameters: Runtime_ElementID Runtime_ChildID Priority
/// uiInterval SenseID Comparator SenseValue SenseHysteresis
/// SenseFlexLatchHysteresis RampIncrement UrgencyMultiplier RampInterval.
fn add_drive(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, child_id, priority, frequency_interval, sense_id, comparator, trigger, hysteresis, flex_latch_hysteresis, ramp_increment, urgency_multiplier, ramp_interval] =
        args
    else {
        return Err(ParseError);
    };
    Ok(Command::AddDrive {
        element_id: to_u16(*element_id)?,
        child_id: to_u16(*child_id)?,
        priority: to_u16(*priority)?,
        frequency_interval: to_u32(*frequency_interval)?,
        sense_id: to_u16(*sense_id)?,
        comparator: to_u8(*comparator)?,
        trigger: to_i32(*trigger)?,
        hysteresis: to_i32(*hysteresis)?,
        flex_latch_hysteresis: to_i32(*flex_latch_hysteresis)?,
        ramp_increment: to_u16(*ramp_increment)?,
        urgency_multiplier: to_u8(*urgency_multiplier)?,
        ramp_interval: to_u32(*ramp_interval)?,
    })
}

/// `A C` — 2 parameters: Runtime_ElementID UseORWithinCEGroup.
fn add_competence(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, use_or] = args else {
        return Err(ParseError);
    };
    Ok(Command::AddCompetence {
        element_id: to_u16(*element_id)?,
        use_or_within_group: *use_or != 0,
    })
}

/// `A A` — 3 parameters: Runtime_ElementID ActionID ActionValue.
fn add_action(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, action_id, action_value] = args else {
        return Err(ParseError);
    };
    Ok(Command::AddAction {
        element_id: to_u16(*element_id)?,
        action_id: to_u16(*action_id)?,
        action_value: to_i32(*action_value)?,
    })
}

/// `A P` — 1 parameter: Runtime_ElementID.
fn add_action_pattern(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id] = args else {
        return Err(ParseError);
    };
    Ok(Command::AddActionPattern { element_id: to_u16(*element_id)? })
}

/// `A E` — 10 parameters: Runtime_ElementID Runtime_ParentID
/// Runtime_ChildID Priority RetryLimit SenseID Comparator SenseValue
/// SenseHysteresis SenseFlexLatchHysteresis.
fn add_competence_element(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, parent_id, child_id, priority, retry_limit, sense_id, comparator, trigger, hysteresis, flex_latch_hysteresis] =
        args
    else {
        return Err(ParseError);
    };
    Ok(Command::AddCompetenceElement {
        element_id: to_u16(*element_id)?,
        parent_id: to_u16(*parent_id)?,
        child_id: to_u16(*child_id)?,
        priority: to_u16(*priority)?,
        retry_limit: to_u16(*retry_limit)?,
        sense_id: to_u16(*sense_id)?,
        comparator: to_u8(*comparator)?,
        trigger: to_i32(*trigger)?,
        hysteresis: to_i32(*hysteresis)?,
        flex_latch_hysteresis: to_i32(*flex_latch_hysteresis)?,
    })
}

/// `A L` — 4 parameters: Runtime_ElementID Runtime_ParentID
/// Runtime_ChildID Order.
fn add_action_pattern_element(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, parent_id, child_id, order] = args else {
        return Err(ParseError);
    };
    Ok(Command::AddActionPatternElement {
        element_id: to_u16(*element_id)?,
        parent_id: to_u16(*parent_id)?,
        child_id: to_u16(*child_id)?,
        order: to_u16(*order)?,
    })
}

/// `M N` — 7 parameters: Runtime_ElementID then the six monitor bits in
/// `{Executed, Success, Pending, Fail, Error, Sense}` order.
fn set_node_monitor(args: &[i64]) -> Result<Command, ParseError> {
    let [element_id, rest @ ..] = args else {
        return Err(ParseError);
    };
    Ok(Command::SetNodeMonitor {
        element_id: to_u16(*element_id)?,
        flags: monitor_flags_from_bits(rest)?,
    })
}

/// `M G` — 6 parameters, same bit order as `M N` without the element id.
fn set_global_monitor(args: &[i64]) -> Result<Command, ParseError> {
    Ok(Command::SetGlobalMonitor(monitor_flags_from_bits(args)?))
}

fn monitor_flags_from_bits(bits: &[i64]) -> Result<MonitorFlags, ParseError> {
    let [executed, success, pending, fail, error, sense] = bits else {
        return Err(ParseError);
    };
    let mut flags = MonitorFlags::NONE;
    for (bit, flag) in [
        (executed, MonitorFlags::EXECUTED),
        (success, MonitorFlags::SUCCESS),
        (pending, MonitorFlags::PENDING),
        (fail, MonitorFlags::FAIL),
        (error, MonitorFlags::ERROR),
        (sense, MonitorFlags::SENSE),
    ] {
        if *bit != 0 {
            flags = flags | flag;
        }
    }
    Ok(flags)
}

/// `R I` — 6 parameters: per-kind capacities in capacity order
/// (ActionPattern, ActionPatternElement, Competence, CompetenceElement,
/// Drive, Action).
fn reset_init(args: &[i64]) -> Result<Command, ParseError> {
    let [ap, ape, c, ce, d, a] = args else {
        return Err(ParseError);
    };
    let mut sizes = [0usize; 6];
    for (slot, v) in sizes.iter_mut().zip([ap, ape, c, ce, d, a]) {
        *slot = usize::try_from(*v).map_err(|_| ParseError)?;
    }
    Ok(Command::ResetInit(sizes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_drive_line_field_by_field() {
        let cmd = parse("A D 2 1 5 0 0 4 0 0 0 0 0 0").unwrap();
        assert_eq!(
            cmd,
            Command::AddDrive {
                element_id: 2,
                child_id: 1,
                priority: 5,
                frequency_interval: 0,
                sense_id: 0,
                comparator: 4,
                trigger: 0,
                hysteresis: 0,
                flex_latch_hysteresis: 0,
                ramp_increment: 0,
                urgency_multiplier: 0,
                ramp_interval: 0,
            }
        );
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert_eq!(parse("A D 1 2 3"), Err(ParseError));
    }

    #[test]
    fn reset_init_uses_capacity_order() {
        assert_eq!(parse("R I 0 0 1 10 2 20").unwrap(), Command::ResetInit([0, 0, 1, 10, 2, 20]));
    }

    #[test]
    fn rejects_malformed_verb() {
        assert_eq!(parse("AD 1 2"), Err(ParseError));
        assert_eq!(parse(""), Err(ParseError));
    }

    #[test]
    fn set_node_monitor_parses_bit_order() {
        let cmd = parse("M N 27 1 1 0 1 1 1").unwrap();
        assert_eq!(
            cmd,
            Command::SetNodeMonitor {
                element_id: 27,
                flags: MonitorFlags::EXECUTED | MonitorFlags::SUCCESS | MonitorFlags::FAIL | MonitorFlags::ERROR | MonitorFlags::SENSE,
            }
        );
    }
}
