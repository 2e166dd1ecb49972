use thiserror::Error;

use crate::nodes::NodeRef;

/// Help text shown when a command can't tell which node to use
pub struct CommandHelp {
    pub select_node_text: &'static str,
    pub syntax_example_text: &'static str,
}

/// A user-input decode failure, recoverable by the caller
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown node to use for command")]
    UnknownNode,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DecodedCommand {
    /// Index into the node list of the selected node
    pub node_index: usize,
    pub params: Vec<String>,
}

/// Decode a command's text into a target node and remaining parameters.
///
/// With a single configured node it is selected implicitly and every token
/// after the command is a parameter. With several nodes the first token must
/// be a 1-based node index; when it is absent or doesn't select a node, the
/// reply callback gets one help message enumerating the choices and the
/// decode fails with a user-input error.
pub fn decode_command(
    nodes: &[NodeRef],
    text: &str,
    help: &CommandHelp,
    reply: &mut dyn FnMut(String),
) -> Result<DecodedCommand, CommandError> {
    let elements: Vec<&str> = text.split_whitespace().skip(1).collect();

    if nodes.len() == 1 {
        return Ok(DecodedCommand {
            node_index: 0,
            params: elements.iter().map(|s| s.to_string()).collect(),
        });
    }

    let selected = elements
        .first()
        .and_then(|token| token.parse::<usize>().ok())
        .filter(|index| (1..=nodes.len()).contains(index));

    let index = match selected {
        Some(index) => index,
        None => {
            reply(node_selection_help(nodes, help));

            return Err(CommandError::UnknownNode);
        }
    };

    Ok(DecodedCommand {
        node_index: index - 1,
        params: elements[1..].iter().map(|s| s.to_string()).collect(),
    })
}

fn node_selection_help(nodes: &[NodeRef], help: &CommandHelp) -> String {
    // Splice the node placeholder into the syntax example after the command
    let mut syntax: Vec<&str> = help.syntax_example_text.split(' ').collect();
    syntax.insert(1.min(syntax.len()), "<node #>");

    let mut lines = vec![help.select_node_text.to_string()];

    lines.extend(
        nodes
            .iter()
            .enumerate()
            .map(|(i, node)| format!("- {}: {}", i + 1, node.from)),
    );

    lines.push(syntax.join(" "));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::tests::node;

    const HELP: CommandHelp = CommandHelp {
        select_node_text: "Which node?",
        syntax_example_text: "/invoice 21000 memo",
    };

    fn params(decoded: &DecodedCommand) -> Vec<&str> {
        decoded.params.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn single_node_takes_all_params() {
        let nodes = [node("alpha", "03aa")];
        let mut replies = Vec::new();

        let decoded =
            decode_command(&nodes, "/cmd a b c", &HELP, &mut |m| replies.push(m)).unwrap();

        assert_eq!(decoded.node_index, 0);
        assert_eq!(params(&decoded), vec!["a", "b", "c"]);
        assert!(replies.is_empty());
    }

    #[test]
    fn multi_node_selects_by_one_based_index() {
        let nodes = [node("alpha", "03aa"), node("beta", "03bb")];
        let mut replies = Vec::new();

        let decoded =
            decode_command(&nodes, "/cmd 2 a b", &HELP, &mut |m| replies.push(m)).unwrap();

        assert_eq!(decoded.node_index, 1);
        assert_eq!(params(&decoded), vec!["a", "b"]);
        assert!(replies.is_empty());
    }

    #[test]
    fn missing_index_fails_with_one_help_reply() {
        let nodes = [node("alpha", "03aa"), node("beta", "03bb")];
        let mut replies = Vec::new();

        let result = decode_command(&nodes, "/cmd a b", &HELP, &mut |m| replies.push(m));

        assert_eq!(result, Err(CommandError::UnknownNode));
        assert_eq!(replies.len(), 1);

        let help = &replies[0];

        assert!(help.contains("Which node?"));
        assert!(help.contains("- 1: alpha"));
        assert!(help.contains("- 2: beta"));
        assert!(help.contains("/invoice <node #> 21000 memo"));
    }

    #[test]
    fn zero_and_out_of_range_indices_fail() {
        let nodes = [node("alpha", "03aa"), node("beta", "03bb")];

        for text in ["/cmd 0 a", "/cmd 3 a", "/cmd"] {
            let mut replies = Vec::new();

            let result = decode_command(&nodes, text, &HELP, &mut |m| replies.push(m));

            assert_eq!(result, Err(CommandError::UnknownNode));
            assert_eq!(replies.len(), 1);
        }
    }
}
