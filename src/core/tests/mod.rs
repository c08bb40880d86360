
/// Three flip-flops feeding back through an inverter
pub(crate) const LOOP_NETWORK: &str = "\
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

/// Two flip-flops and two conjunctions with an undeclared `output`
pub(crate) const OUTPUT_NETWORK: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

/// Binary counter whose conjunctions first emit low in waves 3, 4, 5 and 7
pub(crate) const COUNTER_NETWORK: &str = "\
broadcaster -> f0
%f0 -> f1, c3, c5, c7
%f1 -> f2, c3, c7
%f2 -> c4, c5, c7
&c3 -> out
&c4 -> out
&c5 -> out
&c7 -> out
";
